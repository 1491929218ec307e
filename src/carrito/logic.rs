//! Reconciliación entre carrito local y stock del catálogo.
//!
//! Cada unidad agregada al carrito baja en 1 el stock de la pelota en el
//! servicio de catálogo, y cada unidad quitada lo restaura. Son llamadas
//! secuenciales sin transacción:
//!
//! * **Agregar**: primero se confirma el nuevo stock en el servidor y recién
//!   entonces se agrega la línea local.
//! * **Quitar**: la línea sale primero y vuelve si el servidor no confirma la
//!   restauración.
//! * **Vaciar**: se retiran todas las líneas y se intenta restaurar cada una;
//!   los fallos se registran y no devuelven la línea.
//! * **Checkout**: si el servidor confirma, se vacía el carrito local y el
//!   carrito del servidor en caché.


use std::sync::Arc;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};
use crate::carrito::domain::{Carrito, ResumenVaciado};
use crate::catalogo::domain::Pelota;
use crate::catalogo::logic::EstadoCatalogo;
use crate::network::carrito::CarritoApi;
use crate::network::domain::{CarritoResponse, ItemCarritoRequest};
use crate::system::error::{ErrorTienda, Resultado};


pub struct EstadoCarrito {
    api: Arc<dyn CarritoApi>,
    catalogo: Arc<EstadoCatalogo>,
    carrito: Mutex<Carrito>,
    carrito_servidor: RwLock<Option<CarritoResponse>>,
}


impl EstadoCarrito {
    pub fn new(api: Arc<dyn CarritoApi>, catalogo: Arc<EstadoCatalogo>) -> Self {
        Self {
            api,
            catalogo,
            carrito: Mutex::new(Carrito::new()),
            carrito_servidor: RwLock::new(None),
        }
    }

    pub async fn lineas(&self) -> Vec<Pelota> {
        self.carrito.lock().await.lineas().to_vec()
    }

    pub async fn cantidad(&self) -> usize {
        self.carrito.lock().await.cantidad()
    }

    pub async fn esta_vacio(&self) -> bool {
        self.carrito.lock().await.esta_vacio()
    }

    pub async fn total(&self) -> Decimal {
        self.carrito.lock().await.total()
    }

    pub async fn carrito_servidor(&self) -> Option<CarritoResponse> {
        self.carrito_servidor.read().await.clone()
    }

    /// Agrega una unidad de la pelota al carrito, bajando su stock en el servidor.
    ///
    /// # Errores
    /// * `NoEncontrado` / `SinStock`: nada cambia y no hay llamada de red.
    /// * Error del servidor: ni el carrito ni el stock local cambian.
    #[instrument(name = "agregar_al_carrito", skip(self))]
    pub async fn agregar_al_carrito(&self, id: i64) -> Resultado<Pelota> {
        let confirmada = self.catalogo.decrementar_stock(id).await?;
        self.carrito.lock().await.agregar(confirmada.clone());
        info!("Info: {} agregado al carrito (stock {})", confirmada.nombre, confirmada.stock);
        Ok(confirmada)
    }

    /// Quita una unidad de la pelota del carrito, restaurando su stock.
    ///
    /// La línea sale del carrito antes de llamar al servidor, así dos remociones
    /// concurrentes no restauran la misma unidad. Si la restauración falla, la
    /// línea vuelve al carrito.
    #[instrument(name = "quitar_del_carrito", skip(self))]
    pub async fn quitar_del_carrito(&self, id: i64) -> Resultado<Pelota> {
        let linea = self
            .carrito
            .lock()
            .await
            .quitar_una(id)
            .ok_or(ErrorTienda::no_encontrado(id))?;

        match self.catalogo.restaurar_stock(id).await {
            Ok(restaurada) => {
                info!("Info: {} removido del carrito (stock {})", restaurada.nombre, restaurada.stock);
                Ok(restaurada)
            }
            Err(e) => {
                warn!("Warning: {} vuelve al carrito: {}", linea.nombre, e);
                self.carrito.lock().await.agregar(linea);
                Err(e)
            }
        }
    }

    /// Vacía el carrito intentando restaurar el stock de cada línea.
    ///
    /// Las líneas se retiran de una vez al comenzar; lo que se agregue mientras
    /// tanto queda en el carrito con su stock ya descontado. Los fallos
    /// individuales no detienen el proceso.
    #[instrument(name = "vaciar_carrito", skip(self))]
    pub async fn vaciar_carrito(&self) -> ResumenVaciado {
        let lineas = self.carrito.lock().await.vaciar();
        let mut resumen = ResumenVaciado::default();

        for pelota in &lineas {
            resumen.intentos += 1;
            debug!("Debug: restaurando {}", pelota.nombre);
            if let Err(e) = self.catalogo.restaurar_stock(pelota.id).await {
                resumen.fallidos += 1;
                warn!("Warning: no se pudo restaurar stock de {}: {}", pelota.nombre, e);
            }
        }

        info!("Info: carrito vaciado ({} intentos, {} fallidos)", resumen.intentos, resumen.fallidos);
        resumen
    }

    /// Cierra la compra del usuario.
    ///
    /// Si el servidor la confirma, se vacían el carrito local y el del servidor;
    /// si no, ambos quedan como estaban.
    #[instrument(name = "checkout", skip(self))]
    pub async fn checkout(&self, usuario_id: i64) -> Resultado<()> {
        info!("Info: iniciando checkout para usuario {}", usuario_id);
        if let Err(e) = self.api.checkout(usuario_id).await {
            error!("Error: checkout rechazado: {}", e);
            return Err(e);
        }

        self.carrito.lock().await.vaciar();
        *self.carrito_servidor.write().await = None;
        info!("Info: checkout realizado");
        Ok(())
    }

    /// Descarta el carrito local y el del servidor en caché, sin tocar el stock.
    pub async fn limpiar_todo(&self) {
        self.carrito.lock().await.vaciar();
        *self.carrito_servidor.write().await = None;
    }

    pub async fn obtener_carrito_servidor(&self, usuario_id: i64) -> Resultado<CarritoResponse> {
        let carrito = self.api.obtener(usuario_id).await?;
        debug!("Debug: carrito obtenido: {} items", carrito.items.len());
        Ok(self.guardar_servidor(carrito).await)
    }

    pub async fn agregar_al_carrito_servidor(&self,
                                             usuario_id: i64,
                                             producto_id: i64,
                                             cantidad: i32) -> Resultado<CarritoResponse> {
        if cantidad <= 0 {
            return Err(ErrorTienda::validacion("cantidad", "La cantidad debe ser mayor a 0"));
        }
        let item = ItemCarritoRequest { producto_id, cantidad };
        let carrito = self.api.agregar(usuario_id, &item).await?;
        debug!("Debug: producto agregado: {} items", carrito.items.len());
        Ok(self.guardar_servidor(carrito).await)
    }

    pub async fn eliminar_del_carrito_servidor(&self,
                                               usuario_id: i64,
                                               producto_id: i64) -> Resultado<CarritoResponse> {
        let carrito = self.api.eliminar(usuario_id, producto_id).await?;
        Ok(self.guardar_servidor(carrito).await)
    }

    async fn guardar_servidor(&self, carrito: CarritoResponse) -> CarritoResponse {
        *self.carrito_servidor.write().await = Some(carrito.clone());
        carrito
    }
}
