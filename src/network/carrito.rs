use async_trait::async_trait;
use reqwest::Method;
use crate::network::client::{ClienteHttp, Servicio};
use crate::network::domain::{verificar_envoltura, CarritoResponse, ItemCarritoRequest};
use crate::system::error::{ErrorTienda, Resultado};


/// Contrato del microservicio de carrito (`/api/carrito/{usuarioId}`).
#[async_trait]
pub trait CarritoApi: Send + Sync {
    async fn obtener(&self, usuario_id: i64) -> Resultado<CarritoResponse>;

    async fn agregar(&self, usuario_id: i64, item: &ItemCarritoRequest) -> Resultado<CarritoResponse>;

    async fn eliminar(&self, usuario_id: i64, producto_id: i64) -> Resultado<CarritoResponse>;

    /// Cierra la compra. Falla si el servidor responde `success: false`.
    async fn checkout(&self, usuario_id: i64) -> Resultado<()>;
}


pub struct HttpCarritoApi {
    http: ClienteHttp,
}

impl HttpCarritoApi {
    pub fn new(http: ClienteHttp) -> Self {
        Self { http }
    }
}


#[async_trait]
impl CarritoApi for HttpCarritoApi {
    async fn obtener(&self, usuario_id: i64) -> Resultado<CarritoResponse> {
        let ruta = format!("/api/carrito/{usuario_id}");
        self.http.json(Servicio::Carrito, Method::GET, &ruta, None).await
    }

    async fn agregar(&self, usuario_id: i64, item: &ItemCarritoRequest) -> Resultado<CarritoResponse> {
        let ruta = format!("/api/carrito/{usuario_id}/items");
        let cuerpo = serde_json::to_value(item)?;
        self.http.json(Servicio::Carrito, Method::POST, &ruta, Some(cuerpo)).await
    }

    async fn eliminar(&self, usuario_id: i64, producto_id: i64) -> Resultado<CarritoResponse> {
        let ruta = format!("/api/carrito/{usuario_id}/items/{producto_id}");
        self.http.json(Servicio::Carrito, Method::DELETE, &ruta, None).await
    }

    async fn checkout(&self, usuario_id: i64) -> Resultado<()> {
        let ruta = format!("/api/carrito/{usuario_id}/checkout");
        match self.http.ejecutar(Servicio::Carrito, Method::POST, &ruta, None).await? {
            Some(valor) => verificar_envoltura(&valor),
            // El checkout siempre responde con envoltura; un cuerpo vacío no confirma nada.
            None => Err(ErrorTienda::CuerpoVacio),
        }
    }
}
