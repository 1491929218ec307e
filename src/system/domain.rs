//! Módulo de configuración central y gestión del entorno de ejecución.
//!
//! Este módulo actúa como la fuente única de verdad para la configuración del cliente.
//! Se encarga de leer las variables de entorno, establecer valores por defecto
//! y proveer lo necesario para iniciar los subsistemas (clientes HTTP, Logging).
//!
//! # Funcionalidades Principales
//! * **Carga de Configuración:** Lee de `.env` en desarrollo y variables de sistema en producción.
//! * **Observabilidad:** Configura `tracing_subscriber` para logs estructurados o legibles.
//!


use std::env;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use crate::config::{catalogo, http, servicios};
use crate::system::error::{ErrorTienda, Resultado};


/// Representa la configuración global del cliente y el estado del entorno.
#[derive(Debug, Clone)]
pub struct System {
    /// URL base del microservicio de usuarios.
    pub usuarios_url: String,

    /// URL base del microservicio de catálogo (pelotas).
    pub catalogo_url: String,

    /// URL base del microservicio de carrito.
    pub carrito_url: String,

    /// URL base del proxy del valor del dólar (`/api/dolar`).
    pub externo_url: String,

    /// Timeout total por request, en segundos.
    /// Por defecto: `30` (tolera el arranque en frío de los servicios).
    pub http_timeout_secs: u64,

    /// Si la carga del catálogo falla, usar la lista local de respaldo.
    /// Por defecto: `true`.
    pub catalogo_fallback: bool,

    /// Entorno de ejecución actual (`development`, `staging`, `production`).
    /// Afecta el formato de logs y la carga de archivos `.env`.
    pub environment: String,

    /// Nivel de detalle de los logs (ej. `info`, `debug`, `warn`).
    /// Se autoconfigura según el `environment` si no se especifica.
    pub rust_log: String,
}


impl System {

    /// Carga la configuración desde las variables de entorno.
    ///
    /// # Comportamiento
    /// * Si `ENVIRONMENT` es "development", intenta cargar un archivo `.env`.
    /// * Establece valores por defecto para todas las variables.
    ///
    /// # Errores
    /// * `ErrorTienda::Configuracion` si `HTTP_TIMEOUT_SECS` o `CATALOGO_FALLBACK`
    ///   no tienen un formato válido.
    pub fn new() -> Resultado<Self> {

        info!("Info: creando objeto system");

        let environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".into());

        if environment == "development" {
            dotenv::dotenv().ok();
        }

        Ok(System {
            usuarios_url: env::var("USUARIOS_URL")
                .unwrap_or_else(|_| servicios::USUARIOS_URL.to_string()),

            catalogo_url: env::var("CATALOGO_URL")
                .unwrap_or_else(|_| servicios::CATALOGO_URL.to_string()),

            carrito_url: env::var("CARRITO_URL")
                .unwrap_or_else(|_| servicios::CARRITO_URL.to_string()),

            externo_url: env::var("EXTERNO_URL")
                .unwrap_or_else(|_| servicios::EXTERNO_URL.to_string()),

            http_timeout_secs: leer_variable("HTTP_TIMEOUT_SECS", http::TIMEOUT_SECS)?,

            catalogo_fallback: leer_variable("CATALOGO_FALLBACK", catalogo::FALLBACK_LOCAL)?,

            rust_log: env::var("RUST_LOG")
                .unwrap_or_else(|_| nivel_por_defecto(&environment).to_string()),

            environment,
        })
    }

    /// Configuración apuntando todos los servicios a una misma URL base.
    ///
    /// Útil para pruebas contra un servidor local o un mock.
    pub fn con_url_base(url: &str) -> Self {
        Self {
            usuarios_url: url.to_string(),
            catalogo_url: url.to_string(),
            carrito_url: url.to_string(),
            externo_url: url.to_string(),
            http_timeout_secs: http::TIMEOUT_SECS,
            catalogo_fallback: catalogo::FALLBACK_LOCAL,
            environment: "development".to_string(),
            rust_log: "debug".to_string(),
        }
    }
}


fn leer_variable<T: FromStr>(nombre: &str, por_defecto: T) -> Resultado<T> {
    match env::var(nombre) {
        Ok(valor) => valor
            .trim()
            .parse()
            .map_err(|_| ErrorTienda::Configuracion(format!("{nombre} tiene un valor inválido: '{valor}'"))),
        Err(_) => Ok(por_defecto),
    }
}


fn nivel_por_defecto(environment: &str) -> &'static str {
    match environment {
        "development" => "debug",
        "staging" => "info",
        _ => "warn",
    }
}


/// Inicializa el sistema de trazabilidad y logs (Tracing).
///
/// Configura el formato de salida basándose en el entorno:
/// * **Production**: Salida JSON (para logs estructurados en la nube).
/// * **Development/Otros**: Salida "Pretty" (colores y formato legible).
pub fn init_tracing(system: &System) {

    let filter = EnvFilter::try_new(&system.rust_log)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(filter).with_target(false);

    if system.environment == "production" {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}
