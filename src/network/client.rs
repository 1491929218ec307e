//! Fábrica de clientes HTTP.
//!
//! Construye de forma perezosa un `reqwest::Client` por microservicio y lo
//! memoriza durante toda la vida de la fábrica. No es un pool: cada servicio
//! tiene exactamente un cliente, creado en el primer uso.


use std::sync::Arc;
use std::time::Duration;
use dashmap::DashMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, instrument};
use crate::config::http::{CONNECT_TIMEOUT, USER_AGENT};
use crate::network::domain::{desenvolver, verificar_envoltura};
use crate::system::domain::System;
use crate::system::error::{ErrorTienda, Resultado};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Servicio {
    Usuarios,
    Catalogo,
    Carrito,
    Externo,
}


#[derive(Clone, Debug)]
pub struct ClienteHttp {
    system: Arc<System>,
    clientes: Arc<DashMap<Servicio, reqwest::Client>>,
}


impl ClienteHttp {
    pub fn new(system: Arc<System>) -> Self {
        Self {
            system,
            clientes: Arc::new(DashMap::new()),
        }
    }

    /// Devuelve el cliente del servicio, creándolo si es la primera vez.
    pub fn cliente(&self, servicio: Servicio) -> Resultado<reqwest::Client> {
        if let Some(cliente) = self.clientes.get(&servicio) {
            return Ok(cliente.value().clone());
        }

        debug!("Debug: creando cliente HTTP para {:?}", servicio);
        let nuevo = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.system.http_timeout_secs))
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        // Si otra tarea lo creó en paralelo, se conserva el primero.
        Ok(self.clientes.entry(servicio).or_insert(nuevo).value().clone())
    }

    /// Cantidad de clientes ya construidos.
    pub fn clientes_creados(&self) -> usize {
        self.clientes.len()
    }

    pub fn base_url(&self, servicio: Servicio) -> &str {
        match servicio {
            Servicio::Usuarios => &self.system.usuarios_url,
            Servicio::Catalogo => &self.system.catalogo_url,
            Servicio::Carrito => &self.system.carrito_url,
            Servicio::Externo => &self.system.externo_url,
        }
    }

    pub fn url(&self, servicio: Servicio, ruta: &str) -> String {
        format!(
            "{}/{}",
            self.base_url(servicio).trim_end_matches('/'),
            ruta.trim_start_matches('/')
        )
    }

    /// Ejecuta un request y devuelve el cuerpo JSON, o `None` si vino vacío.
    #[instrument(name = "http_request", skip(self, cuerpo))]
    pub async fn ejecutar(&self,
                          servicio: Servicio,
                          metodo: Method,
                          ruta: &str,
                          cuerpo: Option<Value>) -> Resultado<Option<Value>> {

        let url = self.url(servicio, ruta);
        let mut request = self.cliente(servicio)?.request(metodo.clone(), &url);
        if let Some(cuerpo) = cuerpo {
            request = request.json(&cuerpo);
        }

        let response = request.send().await.map_err(|e| {
            error!("Error: {} {} falló: {}", metodo, url, e);
            ErrorTienda::Red(e)
        })?;

        let status = response.status();
        debug!("Debug: {} {} -> {}", metodo, url, status);
        if !status.is_success() {
            error!("Error: {} {} respondió {}", metodo, url, status);
            return Err(ErrorTienda::Http { status });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Request cuyo cuerpo de respuesta es obligatorio.
    pub async fn json<T: DeserializeOwned>(&self,
                                           servicio: Servicio,
                                           metodo: Method,
                                           ruta: &str,
                                           cuerpo: Option<Value>) -> Resultado<T> {
        match self.ejecutar(servicio, metodo, ruta, cuerpo).await? {
            Some(valor) => desenvolver(valor),
            None => Err(ErrorTienda::CuerpoVacio),
        }
    }

    /// Request donde solo importa el status (y la bandera de éxito si hay envoltura).
    pub async fn sin_respuesta(&self,
                               servicio: Servicio,
                               metodo: Method,
                               ruta: &str) -> Resultado<()> {
        match self.ejecutar(servicio, metodo, ruta, None).await? {
            Some(valor) => verificar_envoltura(&valor),
            None => Ok(()),
        }
    }
}
