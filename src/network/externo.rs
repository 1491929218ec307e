use async_trait::async_trait;
use reqwest::Method;
use crate::network::client::{ClienteHttp, Servicio};
use crate::network::domain::DolarResponse;
use crate::system::error::{ErrorTienda, Resultado};


/// Servicio externo del valor del dólar (proxy de mindicador.cl).
#[async_trait]
pub trait DolarApi: Send + Sync {
    /// Valor más reciente de la serie (primer elemento).
    async fn valor_dolar(&self) -> Resultado<f64>;
}


pub struct HttpDolarApi {
    http: ClienteHttp,
}

impl HttpDolarApi {
    pub fn new(http: ClienteHttp) -> Self {
        Self { http }
    }
}


#[async_trait]
impl DolarApi for HttpDolarApi {
    async fn valor_dolar(&self) -> Resultado<f64> {
        let respuesta: DolarResponse = self.http
            .json(Servicio::Externo, Method::GET, "/api/dolar", None)
            .await?;

        respuesta.serie
            .first()
            .map(|dato| dato.valor)
            .ok_or(ErrorTienda::CuerpoVacio)
    }
}
