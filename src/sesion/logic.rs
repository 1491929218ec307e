//! Estado de sesión: usuario autenticado y operaciones de administración.


use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use crate::network::domain::{LoginRequest, UsuarioRequest};
use crate::network::usuarios::UsuariosApi;
use crate::sesion::domain::{validar_email, validar_registro, Usuario};
use crate::system::error::{ErrorTienda, Resultado};


pub struct EstadoSesion {
    api: Arc<dyn UsuariosApi>,
    usuario: RwLock<Option<Usuario>>,
}


impl EstadoSesion {
    pub fn new(api: Arc<dyn UsuariosApi>) -> Self {
        Self {
            api,
            usuario: RwLock::new(None),
        }
    }

    pub async fn usuario_actual(&self) -> Option<Usuario> {
        self.usuario.read().await.clone()
    }

    pub async fn usuario_id(&self) -> Option<i64> {
        self.usuario.read().await.as_ref().map(|u| u.id)
    }

    pub async fn es_admin(&self) -> bool {
        self.usuario.read().await.as_ref().is_some_and(Usuario::es_admin)
    }

    /// Autentica al usuario. Un login fallido cierra la sesión anterior.
    #[instrument(name = "login", skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Resultado<Usuario> {
        validar_email(email)?;

        let credenciales = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&credenciales).await {
            Ok(respuesta) => {
                let usuario = Usuario::from(respuesta);
                info!("Info: login exitoso: {}, admin: {}", usuario.nombre, usuario.es_admin());
                *self.usuario.write().await = Some(usuario.clone());
                Ok(usuario)
            }
            Err(e) => {
                warn!("Warning: login fallido: {}", e);
                *self.usuario.write().await = None;
                Err(e)
            }
        }
    }

    /// Registra un usuario nuevo y deja la sesión iniciada con él.
    #[instrument(name = "registrar", skip(self, password))]
    pub async fn registrar(&self, email: &str, nombre: &str, password: &str) -> Resultado<Usuario> {
        validar_registro(email, nombre, password)?;

        let request = UsuarioRequest {
            email: email.to_string(),
            nombre: nombre.trim().to_string(),
            password: password.to_string(),
        };

        let usuario = Usuario::from(self.api.registrar(&request).await?);
        info!("Info: registro exitoso: {}", usuario.email);
        *self.usuario.write().await = Some(usuario.clone());
        Ok(usuario)
    }

    pub async fn logout(&self) {
        *self.usuario.write().await = None;
        info!("Info: logout realizado");
    }

    pub async fn listar_usuarios(&self) -> Resultado<Vec<Usuario>> {
        self.exigir_admin().await?;
        let usuarios = self.api.listar().await?;
        Ok(usuarios.into_iter().map(Usuario::from).collect())
    }

    pub async fn obtener_usuario(&self, id: i64) -> Resultado<Usuario> {
        self.exigir_admin().await?;
        Ok(Usuario::from(self.api.obtener(id).await?))
    }

    #[instrument(name = "actualizar_usuario", skip(self, password))]
    pub async fn actualizar_usuario(&self,
                                    id: i64,
                                    email: &str,
                                    nombre: &str,
                                    password: &str) -> Resultado<Usuario> {
        self.exigir_admin().await?;
        validar_registro(email, nombre, password)?;

        let request = UsuarioRequest {
            email: email.to_string(),
            nombre: nombre.trim().to_string(),
            password: password.to_string(),
        };
        let actualizado = Usuario::from(self.api.actualizar(id, &request).await?);

        let mut actual = self.usuario.write().await;
        if actual.as_ref().is_some_and(|u| u.id == id) {
            *actual = Some(actualizado.clone());
        }
        Ok(actualizado)
    }

    /// Elimina un usuario. Un administrador no puede eliminarse a sí mismo.
    #[instrument(name = "eliminar_usuario", skip(self))]
    pub async fn eliminar_usuario(&self, id: i64) -> Resultado<()> {
        self.exigir_admin().await?;
        if self.usuario_id().await == Some(id) {
            return Err(ErrorTienda::validacion("id", "No puede eliminar su propio usuario"));
        }
        self.api.eliminar(id).await?;
        info!("Info: usuario eliminado id={}", id);
        Ok(())
    }

    async fn exigir_admin(&self) -> Resultado<()> {
        match self.usuario.read().await.as_ref() {
            None => Err(ErrorTienda::SinSesion),
            Some(usuario) if !usuario.es_admin() => Err(ErrorTienda::SinPermiso),
            Some(_) => Ok(()),
        }
    }
}
