//! Dominio del catálogo.
//!
//! `Pelota` es el modelo local que muestra el cliente; se reconstruye a partir de
//! cada `PelotaResponse` del servidor. La lista local es solo un caché: el
//! servicio de catálogo es la fuente de verdad.


use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use crate::config::catalogo::DECIMALES_USD;
use crate::network::domain::{PelotaRequest, PelotaResponse};
use crate::system::error::{ErrorTienda, Resultado};


#[derive(Debug, Clone, PartialEq)]
pub struct Pelota {
    pub id: i64,
    pub nombre: String,
    pub precio: Decimal,
    pub descripcion: String,
    /// URL pública o URI local (foto tomada en el panel admin).
    pub image_url: String,
    /// Texto libre; ver `categoria()`.
    pub deporte: String,
    pub marca: String,
    pub stock: i32,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoriaPelota {
    Basketball,
    Futbol,
    Volleyball,
    Otra,
}


impl CategoriaPelota {
    pub fn desde_deporte(deporte: &str) -> Self {
        match deporte.trim().to_uppercase().as_str() {
            "BASKETBALL" => CategoriaPelota::Basketball,
            "FUTBOL" => CategoriaPelota::Futbol,
            "VOLLEYBALL" => CategoriaPelota::Volleyball,
            _ => CategoriaPelota::Otra,
        }
    }
}


impl Pelota {
    pub fn categoria(&self) -> CategoriaPelota {
        CategoriaPelota::desde_deporte(&self.deporte)
    }

    pub fn tiene_stock(&self) -> bool {
        self.stock > 0
    }

    /// Precio en dólares, redondeado a dos decimales.
    ///
    /// `None` si el valor del dólar aún no se conoce (o no es positivo).
    pub fn precio_usd(&self, valor_dolar: f64) -> Option<Decimal> {
        if !valor_dolar.is_finite() || valor_dolar <= 0.0 {
            return None;
        }
        let tasa = Decimal::from_f64(valor_dolar)?;
        self.precio
            .checked_div(tasa)
            .map(|usd| usd.round_dp(DECIMALES_USD))
    }

    /// Request de actualización con el mismo contenido y otro stock.
    pub fn request_con_stock(&self, stock: i32) -> PelotaRequest {
        PelotaRequest {
            stock,
            ..PelotaRequest::from(self)
        }
    }

    /// Reglas mínimas antes de enviar una pelota al servidor.
    pub fn validar(&self) -> Resultado<()> {
        if self.nombre.trim().is_empty() {
            return Err(ErrorTienda::validacion("nombre", "El nombre es requerido"));
        }
        if self.precio <= Decimal::ZERO {
            return Err(ErrorTienda::validacion("precio", "El precio debe ser mayor a 0"));
        }
        if self.stock < 0 {
            return Err(ErrorTienda::validacion("stock", "El stock no puede ser negativo"));
        }
        Ok(())
    }
}


impl From<PelotaResponse> for Pelota {
    fn from(r: PelotaResponse) -> Self {
        Self {
            id: r.id,
            nombre: r.nombre,
            precio: r.precio,
            descripcion: r.descripcion,
            image_url: r.image_url,
            deporte: r.deporte,
            marca: r.marca,
            stock: r.stock,
        }
    }
}


impl From<&Pelota> for PelotaRequest {
    fn from(p: &Pelota) -> Self {
        Self {
            nombre: p.nombre.clone(),
            precio: p.precio,
            descripcion: p.descripcion.clone(),
            image_url: p.image_url.clone(),
            deporte: p.deporte.clone(),
            marca: p.marca.clone(),
            stock: p.stock,
        }
    }
}


/// Catálogo local de respaldo, usado cuando el servicio no responde.
pub fn pelotas_iniciales() -> Vec<Pelota> {
    let datos = [
        (1, "Molten GG7X", 19990, "Pelota profesional de basketball, tamaño 7", "BASKETBALL", "Molten", 10),
        (2, "Spalding NBA", 23990, "Pelota oficial de basketball NBA", "BASKETBALL", "Spalding", 8),
        (3, "Adidas Tango", 17990, "Pelota de fútbol tradicional, resistente al agua", "FUTBOL", "Adidas", 12),
        (4, "Nike Flight", 24990, "Pelota de fútbol alta competición", "FUTBOL", "Nike", 6),
        (5, "Mikasa V200W", 27990, "Pelota oficial de volleyball olímpico", "VOLLEYBALL", "Mikasa", 7),
        (6, "Wilson AVP", 15990, "Pelota de volleyball para juegos playeros", "VOLLEYBALL", "Wilson", 15),
    ];

    datos
        .into_iter()
        .map(|(id, nombre, precio, descripcion, deporte, marca, stock)| Pelota {
            id,
            nombre: nombre.to_string(),
            precio: Decimal::from(precio),
            descripcion: descripcion.to_string(),
            image_url: String::new(),
            deporte: deporte.to_string(),
            marca: marca.to_string(),
            stock,
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn pelota(stock: i32) -> Pelota {
        Pelota {
            id: 9,
            nombre: "Molten GG7X".into(),
            precio: Decimal::from(19990),
            descripcion: "tamaño 7".into(),
            image_url: String::new(),
            deporte: "basketball".into(),
            marca: "Molten".into(),
            stock,
        }
    }

    #[test]
    fn categoria_ignora_mayusculas_y_cae_en_otra() {
        assert_eq!(pelota(1).categoria(), CategoriaPelota::Basketball);
        assert_eq!(CategoriaPelota::desde_deporte("Futbol"), CategoriaPelota::Futbol);
        assert_eq!(CategoriaPelota::desde_deporte("tenis"), CategoriaPelota::Otra);
    }

    #[test]
    fn precio_usd_redondea_a_dos_decimales() {
        let usd = pelota(1).precio_usd(950.0).unwrap();
        assert_eq!(usd, Decimal::new(2104, 2));
        assert_eq!(pelota(1).precio_usd(0.0), None);
    }

    #[test]
    fn request_con_stock_solo_cambia_el_stock() {
        let p = pelota(3);
        let req = p.request_con_stock(2);
        assert_eq!(req.stock, 2);
        assert_eq!(req.nombre, p.nombre);
        assert_eq!(req.precio, p.precio);
    }

    #[test]
    fn validar_rechaza_nombre_vacio_y_stock_negativo() {
        let mut p = pelota(1);
        p.nombre = "  ".into();
        assert!(matches!(p.validar(), Err(ErrorTienda::Validacion { .. })));

        let p = pelota(-1);
        assert!(p.validar().is_err());
        assert!(pelota(0).validar().is_ok());
    }

    #[test]
    fn catalogo_de_respaldo_tiene_seis_pelotas() {
        let pelotas = pelotas_iniciales();
        assert_eq!(pelotas.len(), 6);
        assert!(pelotas.iter().all(|p| p.validar().is_ok()));
    }
}
