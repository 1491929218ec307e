//! Definición del Contexto de Aplicación (Shared State).
//!
//! El `AppContext` actúa como un contenedor de "Inyección de Dependencias" manual:
//! se construye una sola vez con la configuración, la fábrica de clientes HTTP y
//! los estados de catálogo, carrito y sesión, y se pasa explícitamente a quien
//! arme la interfaz o la API. Clonarlo es barato (todo va en `Arc`).


use std::sync::Arc;
use tracing::info;
use crate::carrito::logic::EstadoCarrito;
use crate::catalogo::logic::EstadoCatalogo;
use crate::network::carrito::{CarritoApi, HttpCarritoApi};
use crate::network::catalogo::{CatalogoApi, HttpCatalogoApi};
use crate::network::client::ClienteHttp;
use crate::network::externo::{DolarApi, HttpDolarApi};
use crate::network::usuarios::{HttpUsuariosApi, UsuariosApi};
use crate::sesion::logic::EstadoSesion;
use crate::system::domain::System;
use crate::system::error::{ErrorTienda, Resultado};


/// Servicios remotos que consume el cliente.
#[derive(Clone)]
pub struct Servicios {
    pub usuarios: Arc<dyn UsuariosApi>,
    pub catalogo: Arc<dyn CatalogoApi>,
    pub carrito: Arc<dyn CarritoApi>,
    pub dolar: Arc<dyn DolarApi>,
}


#[derive(Clone)]
pub struct AppContext {
    pub system: Arc<System>,
    pub catalogo: Arc<EstadoCatalogo>,
    pub carrito: Arc<EstadoCarrito>,
    pub sesion: Arc<EstadoSesion>,
}


impl AppContext {
    /// Contexto real: un cliente HTTP por microservicio, creado en el primer uso.
    pub fn new(system: System) -> Self {
        let system = Arc::new(system);
        let http = ClienteHttp::new(system.clone());

        let servicios = Servicios {
            usuarios: Arc::new(HttpUsuariosApi::new(http.clone())),
            catalogo: Arc::new(HttpCatalogoApi::new(http.clone())),
            carrito: Arc::new(HttpCarritoApi::new(http.clone())),
            dolar: Arc::new(HttpDolarApi::new(http)),
        };

        info!("Info: contexto creado (catálogo en {})", system.catalogo_url);
        Self::con_servicios(system, servicios)
    }

    /// Contexto con implementaciones arbitrarias de los servicios.
    pub fn con_servicios(system: Arc<System>, servicios: Servicios) -> Self {
        let catalogo = Arc::new(EstadoCatalogo::new(
            servicios.catalogo,
            servicios.dolar,
            system.catalogo_fallback,
        ));
        let carrito = Arc::new(EstadoCarrito::new(servicios.carrito, catalogo.clone()));
        let sesion = Arc::new(EstadoSesion::new(servicios.usuarios));

        Self { system, catalogo, carrito, sesion }
    }

    /// Checkout del usuario con sesión iniciada.
    pub async fn checkout_sesion(&self) -> Resultado<()> {
        let usuario_id = self.sesion.usuario_id().await.ok_or(ErrorTienda::SinSesion)?;
        self.carrito.checkout(usuario_id).await
    }

    /// Cierra la sesión devolviendo al catálogo el stock reservado en el carrito.
    pub async fn cerrar_sesion(&self) {
        self.carrito.vaciar_carrito().await;
        self.carrito.limpiar_todo().await;
        self.sesion.logout().await;
    }
}
