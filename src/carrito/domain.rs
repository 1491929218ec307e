use rust_decimal::Decimal;
use crate::catalogo::domain::Pelota;


/// Carrito local: lista plana de pelotas, una entrada por unidad.
///
/// Una misma pelota puede aparecer varias veces; no hay conteo por cantidad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Carrito {
    lineas: Vec<Pelota>,
}


/// Resultado de vaciar el carrito restaurando stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumenVaciado {
    pub intentos: usize,
    pub fallidos: usize,
}


impl Carrito {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lineas(&self) -> &[Pelota] {
        &self.lineas
    }

    pub fn agregar(&mut self, pelota: Pelota) {
        self.lineas.push(pelota);
    }

    pub fn contiene(&self, id: i64) -> bool {
        self.lineas.iter().any(|p| p.id == id)
    }

    /// Quita una sola ocurrencia de la pelota. Devuelve la línea quitada.
    pub fn quitar_una(&mut self, id: i64) -> Option<Pelota> {
        let posicion = self.lineas.iter().position(|p| p.id == id)?;
        Some(self.lineas.remove(posicion))
    }

    pub fn ocurrencias(&self, id: i64) -> usize {
        self.lineas.iter().filter(|p| p.id == id).count()
    }

    pub fn cantidad(&self) -> usize {
        self.lineas.len()
    }

    pub fn esta_vacio(&self) -> bool {
        self.lineas.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.lineas.iter().map(|p| p.precio).sum()
    }

    pub fn vaciar(&mut self) -> Vec<Pelota> {
        std::mem::take(&mut self.lineas)
    }
}
