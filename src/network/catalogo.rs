use async_trait::async_trait;
use reqwest::Method;
use crate::network::client::{ClienteHttp, Servicio};
use crate::network::domain::{PelotaRequest, PelotaResponse};
use crate::system::error::Resultado;


/// Contrato del microservicio de catálogo (`/api/pelotas`).
#[async_trait]
pub trait CatalogoApi: Send + Sync {
    async fn listar(&self) -> Resultado<Vec<PelotaResponse>>;

    async fn obtener(&self, id: i64) -> Resultado<PelotaResponse>;

    async fn crear(&self, pelota: &PelotaRequest) -> Resultado<PelotaResponse>;

    async fn actualizar(&self, id: i64, pelota: &PelotaRequest) -> Resultado<PelotaResponse>;

    async fn eliminar(&self, id: i64) -> Resultado<()>;
}


pub struct HttpCatalogoApi {
    http: ClienteHttp,
}

impl HttpCatalogoApi {
    pub fn new(http: ClienteHttp) -> Self {
        Self { http }
    }
}


#[async_trait]
impl CatalogoApi for HttpCatalogoApi {
    async fn listar(&self) -> Resultado<Vec<PelotaResponse>> {
        self.http.json(Servicio::Catalogo, Method::GET, "/api/pelotas", None).await
    }

    async fn obtener(&self, id: i64) -> Resultado<PelotaResponse> {
        let ruta = format!("/api/pelotas/{id}");
        self.http.json(Servicio::Catalogo, Method::GET, &ruta, None).await
    }

    async fn crear(&self, pelota: &PelotaRequest) -> Resultado<PelotaResponse> {
        let cuerpo = serde_json::to_value(pelota)?;
        self.http.json(Servicio::Catalogo, Method::POST, "/api/pelotas", Some(cuerpo)).await
    }

    async fn actualizar(&self, id: i64, pelota: &PelotaRequest) -> Resultado<PelotaResponse> {
        let ruta = format!("/api/pelotas/{id}");
        let cuerpo = serde_json::to_value(pelota)?;
        self.http.json(Servicio::Catalogo, Method::PUT, &ruta, Some(cuerpo)).await
    }

    async fn eliminar(&self, id: i64) -> Resultado<()> {
        let ruta = format!("/api/pelotas/{id}");
        self.http.sin_respuesta(Servicio::Catalogo, Method::DELETE, &ruta).await
    }
}
