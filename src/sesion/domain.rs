//! Dominio de usuarios y sesión.


use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::network::domain::UsuarioResponse;
use crate::system::error::{ErrorTienda, Resultado};


const DOMINIOS_PERMITIDOS: [&str; 3] = ["@duoc.cl", "@gmail.com", "@duocprofesor.cl"];


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rol {
    Admin,
    Cliente,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoUsuario {
    Activo,
    Inactivo,
}


/// Usuario autenticado. La contraseña nunca se guarda en el modelo local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub rol: Rol,
    pub estado: EstadoUsuario,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}


impl Rol {
    /// Cualquier valor distinto de `ADMIN` se trata como cliente.
    pub fn desde_texto(rol: &str) -> Self {
        if rol.trim().eq_ignore_ascii_case("ADMIN") {
            Rol::Admin
        } else {
            Rol::Cliente
        }
    }
}


impl EstadoUsuario {
    /// Sin estado informado, el usuario se considera activo.
    pub fn desde_texto(estado: Option<&str>) -> Self {
        match estado.map(|e| e.trim().to_uppercase()) {
            Some(e) if e == "INACTIVO" || e == "INACTIVE" => EstadoUsuario::Inactivo,
            _ => EstadoUsuario::Activo,
        }
    }
}


impl Usuario {
    pub fn es_admin(&self) -> bool {
        self.rol == Rol::Admin
    }
}


impl From<UsuarioResponse> for Usuario {
    fn from(r: UsuarioResponse) -> Self {
        Self {
            id: r.id,
            nombre: r.nombre,
            email: r.email,
            rol: Rol::desde_texto(&r.rol),
            estado: EstadoUsuario::desde_texto(r.estado.as_deref()),
            created_at: r.created_at.as_deref().and_then(parsear_fecha),
            updated_at: r.updated_at.as_deref().and_then(parsear_fecha),
        }
    }
}


/// Acepta RFC 3339 o la fecha local sin zona que serializa el backend.
fn parsear_fecha(texto: &str) -> Option<DateTime<Utc>> {
    if let Ok(fecha) = DateTime::parse_from_rfc3339(texto) {
        return Some(fecha.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(texto, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|fecha| fecha.and_utc())
}


pub fn es_email_valido(email: &str) -> bool {
    validar_email(email).is_ok()
}


pub fn validar_email(email: &str) -> Resultado<()> {
    let mensaje = if email.is_empty() {
        "El email es requerido"
    } else if !email.contains('@') {
        "Email inválido"
    } else if !DOMINIOS_PERMITIDOS.iter().any(|d| email.ends_with(d)) {
        "Email debe ser @duoc.cl, @gmail.com o @duocprofesor.cl"
    } else {
        return Ok(());
    };
    Err(ErrorTienda::validacion("email", mensaje))
}


pub fn validar_registro(email: &str, nombre: &str, password: &str) -> Resultado<()> {
    validar_email(email)?;
    if nombre.trim().is_empty() {
        return Err(ErrorTienda::validacion("nombre", "El nombre es requerido"));
    }
    if password.is_empty() {
        return Err(ErrorTienda::validacion("password", "La contraseña es requerida"));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn respuesta(rol: &str) -> UsuarioResponse {
        UsuarioResponse {
            id: 1,
            email: "ana@duoc.cl".into(),
            nombre: "Ana".into(),
            rol: rol.into(),
            estado: None,
            created_at: Some("2025-03-10T14:30:00".into()),
            updated_at: Some("2025-03-11T09:00:00Z".into()),
        }
    }

    #[test]
    fn rol_admin_sin_importar_mayusculas() {
        assert!(Usuario::from(respuesta("admin")).es_admin());
        assert!(!Usuario::from(respuesta("CLIENTE")).es_admin());
    }

    #[test]
    fn fechas_con_y_sin_zona() {
        let usuario = Usuario::from(respuesta("CLIENTE"));
        let creado = usuario.created_at.unwrap();
        assert_eq!((creado.year(), creado.month(), creado.hour()), (2025, 3, 14));
        assert_eq!(usuario.updated_at.unwrap().day(), 11);
        assert_eq!(usuario.estado, EstadoUsuario::Activo);
    }

    #[test]
    fn estado_inactivo() {
        assert_eq!(EstadoUsuario::desde_texto(Some("inactivo")), EstadoUsuario::Inactivo);
        assert_eq!(EstadoUsuario::desde_texto(Some("ACTIVO")), EstadoUsuario::Activo);
    }

    #[test]
    fn email_con_dominios_permitidos() {
        assert!(es_email_valido("profe@duocprofesor.cl"));
        assert!(es_email_valido("a@gmail.com"));
        assert!(!es_email_valido("a@hotmail.com"));

        match validar_email("sin-arroba") {
            Err(ErrorTienda::Validacion { mensaje, .. }) => assert_eq!(mensaje, "Email inválido"),
            otro => panic!("se esperaba Validacion, llegó {otro:?}"),
        }
        assert!(validar_email("").is_err());
    }

    #[test]
    fn registro_exige_nombre_y_password() {
        assert!(validar_registro("a@gmail.com", "Ana", "secreta").is_ok());
        assert!(validar_registro("a@gmail.com", " ", "secreta").is_err());
        assert!(validar_registro("a@gmail.com", "Ana", "").is_err());
    }
}
