use async_trait::async_trait;
use reqwest::Method;
use crate::network::client::{ClienteHttp, Servicio};
use crate::network::domain::{LoginRequest, UsuarioRequest, UsuarioResponse};
use crate::system::error::Resultado;


/// Contrato del microservicio de usuarios (`/api/usuarios`).
#[async_trait]
pub trait UsuariosApi: Send + Sync {
    async fn login(&self, credenciales: &LoginRequest) -> Resultado<UsuarioResponse>;

    async fn registrar(&self, usuario: &UsuarioRequest) -> Resultado<UsuarioResponse>;

    async fn obtener(&self, id: i64) -> Resultado<UsuarioResponse>;

    async fn listar(&self) -> Resultado<Vec<UsuarioResponse>>;

    async fn actualizar(&self, id: i64, usuario: &UsuarioRequest) -> Resultado<UsuarioResponse>;

    async fn eliminar(&self, id: i64) -> Resultado<()>;
}


pub struct HttpUsuariosApi {
    http: ClienteHttp,
}

impl HttpUsuariosApi {
    pub fn new(http: ClienteHttp) -> Self {
        Self { http }
    }
}


#[async_trait]
impl UsuariosApi for HttpUsuariosApi {
    async fn login(&self, credenciales: &LoginRequest) -> Resultado<UsuarioResponse> {
        let cuerpo = serde_json::to_value(credenciales)?;
        self.http.json(Servicio::Usuarios, Method::POST, "/api/usuarios/login", Some(cuerpo)).await
    }

    async fn registrar(&self, usuario: &UsuarioRequest) -> Resultado<UsuarioResponse> {
        let cuerpo = serde_json::to_value(usuario)?;
        self.http.json(Servicio::Usuarios, Method::POST, "/api/usuarios/register", Some(cuerpo)).await
    }

    async fn obtener(&self, id: i64) -> Resultado<UsuarioResponse> {
        let ruta = format!("/api/usuarios/{id}");
        self.http.json(Servicio::Usuarios, Method::GET, &ruta, None).await
    }

    async fn listar(&self) -> Resultado<Vec<UsuarioResponse>> {
        self.http.json(Servicio::Usuarios, Method::GET, "/api/usuarios", None).await
    }

    async fn actualizar(&self, id: i64, usuario: &UsuarioRequest) -> Resultado<UsuarioResponse> {
        let ruta = format!("/api/usuarios/{id}");
        let cuerpo = serde_json::to_value(usuario)?;
        self.http.json(Servicio::Usuarios, Method::PUT, &ruta, Some(cuerpo)).await
    }

    async fn eliminar(&self, id: i64) -> Resultado<()> {
        let ruta = format!("/api/usuarios/{id}");
        self.http.sin_respuesta(Servicio::Usuarios, Method::DELETE, &ruta).await
    }
}
