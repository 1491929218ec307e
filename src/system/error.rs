//! Taxonomía de errores del cliente.
//!
//! Todo error termina siendo un mensaje visible para el usuario: el texto de
//! `Display` de cada variante es lo que se muestra.

use reqwest::StatusCode;
use thiserror::Error;


pub type Resultado<T> = Result<T, ErrorTienda>;


#[derive(Error, Debug)]
pub enum ErrorTienda {
    #[error("Producto no encontrado: {id}")]
    NoEncontrado { id: i64 },

    #[error("Sin stock: {nombre}")]
    SinStock { nombre: String },

    #[error("Error de conexión: {0}")]
    Red(#[from] reqwest::Error),

    #[error("Error {status}")]
    Http { status: StatusCode },

    #[error("Respuesta vacía del servidor")]
    CuerpoVacio,

    #[error("Respuesta inválida del servidor: {0}")]
    Decodificacion(#[from] serde_json::Error),

    #[error("Rechazado por el servidor: {mensaje}")]
    Rechazado { mensaje: String },

    #[error("{campo}: {mensaje}")]
    Validacion { campo: String, mensaje: String },

    #[error("Debe iniciar sesión")]
    SinSesion,

    #[error("Se requiere una sesión de administrador")]
    SinPermiso,

    #[error("Configuración inválida: {0}")]
    Configuracion(String),
}


impl ErrorTienda {
    pub fn no_encontrado(id: i64) -> Self {
        Self::NoEncontrado { id }
    }

    pub fn sin_stock(nombre: impl Into<String>) -> Self {
        Self::SinStock { nombre: nombre.into() }
    }

    pub fn validacion(campo: impl Into<String>, mensaje: impl Into<String>) -> Self {
        Self::Validacion {
            campo: campo.into(),
            mensaje: mensaje.into(),
        }
    }

    pub fn rechazado(mensaje: impl Into<String>) -> Self {
        Self::Rechazado { mensaje: mensaje.into() }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mensajes_visibles_para_el_usuario() {
        assert_eq!(ErrorTienda::no_encontrado(7).to_string(), "Producto no encontrado: 7");
        assert_eq!(ErrorTienda::sin_stock("Molten GG7X").to_string(), "Sin stock: Molten GG7X");
        assert_eq!(
            ErrorTienda::Http { status: StatusCode::NOT_FOUND }.to_string(),
            "Error 404 Not Found"
        );
        assert_eq!(
            ErrorTienda::validacion("email", "El email es requerido").to_string(),
            "email: El email es requerido"
        );
    }
}
