//! Estado del catálogo.
//!
//! Mantiene en memoria la lista de pelotas y el valor del dólar. Toda mutación
//! pasa primero por el servicio de catálogo; la lista local solo se actualiza
//! con lo que el servidor confirma.
//!
//! # Ajustes de stock
//! `decrementar_stock` y `restaurar_stock` leen el stock del caché y envían el
//! valor absoluto resultante (`stock ± 1`) con un `PUT`. No hay versión ni
//! compare-and-swap en el backend: dos clientes distintos pueden pisarse. Dentro
//! de un mismo proceso los ajustes se serializan con `ajustes`.


use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use crate::catalogo::domain::{pelotas_iniciales, CategoriaPelota, Pelota};
use crate::network::catalogo::CatalogoApi;
use crate::network::domain::PelotaRequest;
use crate::network::externo::DolarApi;
use crate::system::error::{ErrorTienda, Resultado};


pub struct EstadoCatalogo {
    api: Arc<dyn CatalogoApi>,
    dolar_api: Arc<dyn DolarApi>,
    fallback_local: bool,
    pelotas: RwLock<Vec<Pelota>>,
    valor_dolar: RwLock<Option<f64>>,
    ajustes: Mutex<()>,
}


impl EstadoCatalogo {
    pub fn new(api: Arc<dyn CatalogoApi>,
               dolar_api: Arc<dyn DolarApi>,
               fallback_local: bool) -> Self {
        Self {
            api,
            dolar_api,
            fallback_local,
            pelotas: RwLock::new(Vec::new()),
            valor_dolar: RwLock::new(None),
            ajustes: Mutex::new(()),
        }
    }

    pub async fn pelotas(&self) -> Vec<Pelota> {
        self.pelotas.read().await.clone()
    }

    pub async fn buscar(&self, id: i64) -> Option<Pelota> {
        self.pelotas.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn por_categoria(&self, categoria: CategoriaPelota) -> Vec<Pelota> {
        self.pelotas
            .read()
            .await
            .iter()
            .filter(|p| p.categoria() == categoria)
            .cloned()
            .collect()
    }

    pub async fn valor_dolar(&self) -> Option<f64> {
        *self.valor_dolar.read().await
    }

    /// Reemplaza la lista local completa con la del servidor.
    ///
    /// Si la carga falla y la lista local está vacía, se usa el catálogo de
    /// respaldo (cuando está habilitado). El error se devuelve igual.
    #[instrument(name = "cargar_catalogo", skip(self))]
    pub async fn cargar(&self) -> Resultado<usize> {
        debug!("Debug: llamando a GET /api/pelotas");
        match self.api.listar().await {
            Ok(respuesta) => {
                let nuevas: Vec<Pelota> = respuesta.into_iter().map(Pelota::from).collect();
                let total = nuevas.len();
                *self.pelotas.write().await = nuevas;
                info!("Info: recibidas {} pelotas", total);
                Ok(total)
            }
            Err(e) => {
                warn!("Warning: no se pudo cargar el catálogo: {}", e);
                if self.fallback_local {
                    let mut pelotas = self.pelotas.write().await;
                    if pelotas.is_empty() {
                        warn!("Warning: cargando catálogo local de respaldo");
                        *pelotas = pelotas_iniciales();
                    }
                }
                Err(e)
            }
        }
    }

    /// Consulta el valor del dólar. Si falla, se conserva el último valor conocido.
    pub async fn actualizar_valor_dolar(&self) -> Option<f64> {
        match self.dolar_api.valor_dolar().await {
            Ok(valor) => {
                info!("Info: dólar hoy: {}", valor);
                *self.valor_dolar.write().await = Some(valor);
                Some(valor)
            }
            Err(e) => {
                warn!("Warning: no se pudo obtener el dólar: {}", e);
                self.valor_dolar().await
            }
        }
    }

    #[instrument(name = "crear_pelota", skip(self, nueva), fields(nombre = %nueva.nombre))]
    pub async fn crear(&self, nueva: &Pelota) -> Resultado<Pelota> {
        nueva.validar()?;
        let creada = Pelota::from(self.api.crear(&PelotaRequest::from(nueva)).await?);
        self.pelotas.write().await.push(creada.clone());
        info!("Info: pelota creada: {}", creada.nombre);
        Ok(creada)
    }

    #[instrument(name = "actualizar_pelota", skip(self, pelota), fields(id = pelota.id))]
    pub async fn actualizar(&self, pelota: &Pelota) -> Resultado<Pelota> {
        pelota.validar()?;
        let actualizada = Pelota::from(self.api.actualizar(pelota.id, &PelotaRequest::from(pelota)).await?);
        self.reemplazar_local(actualizada.clone()).await;
        info!("Info: pelota actualizada: {}", actualizada.nombre);
        Ok(actualizada)
    }

    /// Elimina en el servidor; la lista local solo cambia si el servidor confirma.
    #[instrument(name = "eliminar_pelota", skip(self))]
    pub async fn eliminar(&self, id: i64) -> Resultado<()> {
        self.api.eliminar(id).await?;
        self.pelotas.write().await.retain(|p| p.id != id);
        info!("Info: pelota eliminada id={}", id);
        Ok(())
    }

    /// Baja en 1 el stock de una pelota (al agregarla al carrito).
    ///
    /// # Errores
    /// * `NoEncontrado` si la pelota no está en el caché.
    /// * `SinStock` si el stock es 0; no se llama al servidor.
    /// * Cualquier error del servidor; el caché queda intacto.
    #[instrument(name = "decrementar_stock", skip(self))]
    pub async fn decrementar_stock(&self, id: i64) -> Resultado<Pelota> {
        let _turno = self.ajustes.lock().await;

        let pelota = self.buscar(id).await.ok_or(ErrorTienda::no_encontrado(id))?;
        if !pelota.tiene_stock() {
            return Err(ErrorTienda::sin_stock(pelota.nombre));
        }

        let confirmada = self.ajustar_stock(&pelota, pelota.stock - 1).await?;
        debug!("Debug: stock bajado a {}", confirmada.stock);
        Ok(confirmada)
    }

    /// Sube en 1 el stock de una pelota (al quitarla del carrito).
    #[instrument(name = "restaurar_stock", skip(self))]
    pub async fn restaurar_stock(&self, id: i64) -> Resultado<Pelota> {
        let _turno = self.ajustes.lock().await;

        let pelota = self.buscar(id).await.ok_or(ErrorTienda::no_encontrado(id))?;
        let stock = pelota
            .stock
            .checked_add(1)
            .ok_or_else(|| ErrorTienda::validacion("stock", "El stock excede el máximo permitido"))?;
        let confirmada = self.ajustar_stock(&pelota, stock).await?;
        debug!("Debug: stock restaurado a {}", confirmada.stock);
        Ok(confirmada)
    }

    async fn ajustar_stock(&self, pelota: &Pelota, stock: i32) -> Resultado<Pelota> {
        let respuesta = self.api.actualizar(pelota.id, &pelota.request_con_stock(stock)).await?;
        let confirmada = Pelota::from(respuesta);
        self.reemplazar_local(confirmada.clone()).await;
        Ok(confirmada)
    }

    async fn reemplazar_local(&self, pelota: Pelota) {
        let mut pelotas = self.pelotas.write().await;
        if let Some(actual) = pelotas.iter_mut().find(|p| p.id == pelota.id) {
            *actual = pelota;
        }
    }
}


#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use rust_decimal::Decimal;
    use crate::network::domain::PelotaResponse;

    /// Servicio de catálogo en memoria. Los ids en `fallar_en` responden 500.
    /// Con `ceder` activo, `actualizar` cede el turno antes de aplicar el cambio.
    #[derive(Default)]
    pub struct CatalogoEnMemoria {
        pub pelotas: std::sync::Mutex<HashMap<i64, PelotaResponse>>,
        pub fallar_en: std::sync::Mutex<Vec<i64>>,
        pub caido: std::sync::atomic::AtomicBool,
        pub ceder: std::sync::atomic::AtomicBool,
        pub actualizaciones: AtomicUsize,
    }

    impl CatalogoEnMemoria {
        pub fn con(pelotas: Vec<PelotaResponse>) -> Self {
            let fake = Self::default();
            {
                let mut mapa = fake.pelotas.lock().unwrap();
                for p in pelotas {
                    mapa.insert(p.id, p);
                }
            }
            fake
        }

        pub fn stock(&self, id: i64) -> i32 {
            self.pelotas.lock().unwrap()[&id].stock
        }

        fn error_500() -> ErrorTienda {
            ErrorTienda::Http { status: StatusCode::INTERNAL_SERVER_ERROR }
        }
    }

    #[async_trait]
    impl CatalogoApi for CatalogoEnMemoria {
        async fn listar(&self) -> Resultado<Vec<PelotaResponse>> {
            if self.caido.load(Ordering::SeqCst) {
                return Err(Self::error_500());
            }
            let mut lista: Vec<_> = self.pelotas.lock().unwrap().values().cloned().collect();
            lista.sort_by_key(|p| p.id);
            Ok(lista)
        }

        async fn obtener(&self, id: i64) -> Resultado<PelotaResponse> {
            self.pelotas.lock().unwrap().get(&id).cloned().ok_or(ErrorTienda::no_encontrado(id))
        }

        async fn crear(&self, pelota: &PelotaRequest) -> Resultado<PelotaResponse> {
            let mut mapa = self.pelotas.lock().unwrap();
            let id = mapa.keys().max().copied().unwrap_or(0) + 1;
            let creada = respuesta_desde(id, pelota);
            mapa.insert(id, creada.clone());
            Ok(creada)
        }

        async fn actualizar(&self, id: i64, pelota: &PelotaRequest) -> Resultado<PelotaResponse> {
            self.actualizaciones.fetch_add(1, Ordering::SeqCst);
            if self.ceder.load(Ordering::SeqCst) {
                tokio::task::yield_now().await;
            }
            if self.caido.load(Ordering::SeqCst) || self.fallar_en.lock().unwrap().contains(&id) {
                return Err(Self::error_500());
            }
            let mut mapa = self.pelotas.lock().unwrap();
            if !mapa.contains_key(&id) {
                return Err(ErrorTienda::Http { status: StatusCode::NOT_FOUND });
            }
            let actualizada = respuesta_desde(id, pelota);
            mapa.insert(id, actualizada.clone());
            Ok(actualizada)
        }

        async fn eliminar(&self, id: i64) -> Resultado<()> {
            if self.caido.load(Ordering::SeqCst) {
                return Err(Self::error_500());
            }
            self.pelotas.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    /// Dólar fijo o ausente.
    pub struct DolarFijo(pub Option<f64>);

    #[async_trait]
    impl DolarApi for DolarFijo {
        async fn valor_dolar(&self) -> Resultado<f64> {
            self.0.ok_or(ErrorTienda::CuerpoVacio)
        }
    }

    fn respuesta_desde(id: i64, req: &PelotaRequest) -> PelotaResponse {
        PelotaResponse {
            id,
            nombre: req.nombre.clone(),
            precio: req.precio,
            descripcion: req.descripcion.clone(),
            image_url: req.image_url.clone(),
            deporte: req.deporte.clone(),
            marca: req.marca.clone(),
            stock: req.stock,
        }
    }

    pub fn pelota_response(id: i64, nombre: &str, stock: i32) -> PelotaResponse {
        PelotaResponse {
            id,
            nombre: nombre.to_string(),
            precio: Decimal::from(10000 + id),
            descripcion: String::new(),
            image_url: String::new(),
            deporte: "FUTBOL".to_string(),
            marca: "Adidas".to_string(),
            stock,
        }
    }

    pub async fn catalogo_cargado(pelotas: Vec<PelotaResponse>) -> (Arc<CatalogoEnMemoria>, Arc<EstadoCatalogo>) {
        let api = Arc::new(CatalogoEnMemoria::con(pelotas));
        let estado = Arc::new(EstadoCatalogo::new(api.clone(), Arc::new(DolarFijo(Some(950.0))), true));
        estado.cargar().await.unwrap();
        (api, estado)
    }

    #[tokio::test]
    async fn restaurar_con_stock_maximo_no_desborda() {
        let (api, estado) = catalogo_cargado(vec![pelota_response(1, "A", i32::MAX)]).await;

        let res = estado.restaurar_stock(1).await;

        assert!(matches!(res, Err(ErrorTienda::Validacion { .. })));
        assert_eq!(api.actualizaciones.load(Ordering::SeqCst), 0);
        assert_eq!(estado.buscar(1).await.unwrap().stock, i32::MAX);
    }

    #[tokio::test]
    async fn cargar_reemplaza_la_lista_completa() {
        let (api, estado) = catalogo_cargado(vec![pelota_response(1, "A", 3)]).await;
        assert_eq!(estado.pelotas().await.len(), 1);

        api.pelotas.lock().unwrap().insert(2, pelota_response(2, "B", 1));
        assert_eq!(estado.cargar().await.unwrap(), 2);
        assert_eq!(estado.pelotas().await.len(), 2);
    }

    #[tokio::test]
    async fn cargar_con_servicio_caido_usa_respaldo_si_no_hay_nada() {
        let api = Arc::new(CatalogoEnMemoria::default());
        api.caido.store(true, Ordering::SeqCst);
        let estado = EstadoCatalogo::new(api, Arc::new(DolarFijo(None)), true);

        assert!(estado.cargar().await.is_err());
        assert_eq!(estado.pelotas().await, pelotas_iniciales());
    }

    #[tokio::test]
    async fn cargar_con_servicio_caido_sin_respaldo_deja_la_lista_vacia() {
        let api = Arc::new(CatalogoEnMemoria::default());
        api.caido.store(true, Ordering::SeqCst);
        let estado = EstadoCatalogo::new(api, Arc::new(DolarFijo(None)), false);

        assert!(estado.cargar().await.is_err());
        assert!(estado.pelotas().await.is_empty());
    }

    #[tokio::test]
    async fn decrementar_sin_stock_no_llama_al_servidor() {
        let (api, estado) = catalogo_cargado(vec![pelota_response(1, "Agotada", 0)]).await;

        let res = estado.decrementar_stock(1).await;
        assert!(matches!(res, Err(ErrorTienda::SinStock { .. })));
        assert_eq!(api.actualizaciones.load(Ordering::SeqCst), 0);
        assert_eq!(estado.buscar(1).await.unwrap().stock, 0);
    }

    #[tokio::test]
    async fn decrementar_pelota_desconocida_es_no_encontrado() {
        let (_, estado) = catalogo_cargado(vec![pelota_response(1, "A", 2)]).await;
        assert!(matches!(estado.decrementar_stock(99).await, Err(ErrorTienda::NoEncontrado { id: 99 })));
    }

    #[tokio::test]
    async fn restaurar_con_error_del_servidor_no_toca_el_cache() {
        let (api, estado) = catalogo_cargado(vec![pelota_response(1, "A", 2)]).await;
        api.fallar_en.lock().unwrap().push(1);

        assert!(estado.restaurar_stock(1).await.is_err());
        assert_eq!(estado.buscar(1).await.unwrap().stock, 2);
    }

    #[tokio::test]
    async fn crear_valida_antes_de_llamar_al_servidor() {
        let (api, estado) = catalogo_cargado(vec![]).await;
        let mut nueva = Pelota::from(pelota_response(0, "Nueva", 5));

        nueva.precio = Decimal::ZERO;
        assert!(matches!(estado.crear(&nueva).await, Err(ErrorTienda::Validacion { .. })));
        assert!(api.pelotas.lock().unwrap().is_empty());

        nueva.precio = Decimal::from(5990);
        let creada = estado.crear(&nueva).await.unwrap();
        assert_eq!(creada.id, 1);
        assert_eq!(estado.pelotas().await, vec![creada]);
    }

    #[tokio::test]
    async fn eliminar_fallido_conserva_la_pelota_local() {
        let (api, estado) = catalogo_cargado(vec![pelota_response(1, "A", 2)]).await;
        api.caido.store(true, Ordering::SeqCst);

        assert!(estado.eliminar(1).await.is_err());
        assert!(estado.buscar(1).await.is_some());

        api.caido.store(false, Ordering::SeqCst);
        estado.eliminar(1).await.unwrap();
        assert!(estado.buscar(1).await.is_none());
    }

    #[tokio::test]
    async fn valor_dolar_conserva_el_ultimo_conocido() {
        let (_, estado) = catalogo_cargado(vec![]).await;
        assert_eq!(estado.valor_dolar().await, None);
        assert_eq!(estado.actualizar_valor_dolar().await, Some(950.0));

        let sin_dolar = EstadoCatalogo::new(Arc::new(CatalogoEnMemoria::default()), Arc::new(DolarFijo(None)), true);
        assert_eq!(sin_dolar.actualizar_valor_dolar().await, None);
    }
}
