//! Cliente de la tienda MundoPelota.
//!
//! Capa delgada sobre los microservicios de usuarios, catálogo y carrito, más
//! el servicio externo del valor del dólar. Todo se arma desde un `AppContext`.

pub mod carrito;
pub mod catalogo;
pub mod config;
pub mod context;
pub mod network;
pub mod sesion;
pub mod system;
