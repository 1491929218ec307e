pub mod servicios {
    pub const USUARIOS_URL: &str = "https://ms-usuario-5m0i.onrender.com";
    pub const CATALOGO_URL: &str = "https://ms-catalogo-hora.onrender.com";
    pub const CARRITO_URL: &str = "https://ms-carrito-zqlc.onrender.com";
    pub const EXTERNO_URL: &str = "https://ms-catalogo-hora.onrender.com";
}

pub mod http {
    use std::time::Duration;

    /// Los servicios en Render tardan en despertar (cold start).
    pub const TIMEOUT_SECS: u64 = 30;
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &str = concat!("mundo_pelota/", env!("CARGO_PKG_VERSION"));
}

pub mod catalogo {
    pub const FALLBACK_LOCAL: bool = true;
    pub const DECIMALES_USD: u32 = 2;
}
