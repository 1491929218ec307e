//! Contratos de datos de los microservicios (DTOs).
//!
//! Este módulo define las estructuras que viajan por la red, con los nombres de
//! campo tal como los expone el backend (camelCase en español). Los modelos de
//! dominio (`Pelota`, `Usuario`) se construyen a partir de estas respuestas.
//!
//! # Envoltura de respuestas
//! Algunos endpoints devuelven `{ success, message, data }` (o `{ status, message, data }`)
//! y otros el payload directo. `desenvolver` acepta ambas formas.


use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::system::error::{ErrorTienda, Resultado};


/// Pelota tal como la devuelve el servicio de catálogo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PelotaResponse {
    pub id: i64,
    pub nombre: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub deporte: String,
    #[serde(default)]
    pub marca: String,
    pub stock: i32,
}


/// Cuerpo de creación/actualización de una pelota (sin `id`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PelotaRequest {
    pub nombre: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub descripcion: String,
    pub image_url: String,
    pub deporte: String,
    pub marca: String,
    pub stock: i32,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemCarritoRequest {
    pub producto_id: i64,
    pub cantidad: i32,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemCarritoResponse {
    pub id: i64,
    pub producto_id: i64,
    pub cantidad: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio_unitario: Decimal,
}


/// Carrito persistido en el servicio de carrito.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarritoResponse {
    pub id: i64,
    pub usuario_id: i64,
    #[serde(default)]
    pub items: Vec<ItemCarritoResponse>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}


/// Cuerpo de registro y actualización de usuario. Único lugar donde viaja la contraseña.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsuarioRequest {
    pub email: String,
    pub nombre: String,
    pub password: String,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioResponse {
    pub id: i64,
    pub email: String,
    pub nombre: String,
    pub rol: String,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}


/// Respuesta del proxy de indicadores (formato mindicador.cl).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DolarResponse {
    #[serde(default)]
    pub serie: Vec<SerieData>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerieData {
    pub valor: f64,
    #[serde(default)]
    pub fecha: String,
}


/// Verifica la bandera de éxito de una respuesta envuelta.
///
/// Una respuesta sin envoltura se considera exitosa (el status HTTP ya fue 2xx).
pub fn verificar_envoltura(valor: &Value) -> Resultado<()> {
    let Some(obj) = valor.as_object() else {
        return Ok(());
    };
    if !es_envoltura(valor) {
        return Ok(());
    }

    let exito = match (obj.get("success"), obj.get("status")) {
        (Some(Value::Bool(success)), _) => *success,
        (_, Some(Value::Number(status))) => status
            .as_i64()
            .is_some_and(|s| (200..300).contains(&s)),
        _ => true,
    };

    if exito {
        Ok(())
    } else {
        let mensaje = obj
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("sin mensaje")
            .to_string();
        Err(ErrorTienda::rechazado(mensaje))
    }
}


/// Extrae el payload de una respuesta, envuelta o directa.
///
/// * Envoltura con bandera de fallo: `Rechazado`.
/// * Envoltura con `data: null` o cuerpo `null`: `CuerpoVacio`.
pub fn desenvolver<T: DeserializeOwned>(valor: Value) -> Resultado<T> {
    verificar_envoltura(&valor)?;

    let payload = if es_envoltura(&valor) {
        match valor {
            Value::Object(mut obj) => obj.remove("data").unwrap_or(Value::Null),
            otro => otro,
        }
    } else {
        valor
    };

    if payload.is_null() {
        return Err(ErrorTienda::CuerpoVacio);
    }
    Ok(serde_json::from_value(payload)?)
}


/// Una bandera `success` booleana alcanza; `status` exige además `message` o `data`.
fn es_envoltura(valor: &Value) -> bool {
    valor.as_object().is_some_and(|obj| {
        let con_success = matches!(obj.get("success"), Some(Value::Bool(_)));
        let con_status = matches!(obj.get("status"), Some(Value::Number(_)))
            && (obj.contains_key("message") || obj.contains_key("data"));
        con_success || con_status
    })
}
