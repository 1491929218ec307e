pub mod carrito;
pub mod catalogo;
pub mod client;
pub mod domain;
pub mod externo;
pub mod usuarios;
