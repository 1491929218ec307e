use mundo_pelota::context::domain::AppContext;
use mundo_pelota::system::domain::{init_tracing, System};
use tracing::{error, warn};


#[tokio::main]
async fn main() {

    let system = match System::new() {
        Ok(system) => system,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    init_tracing(&system);

    let app_context = AppContext::new(system);

    if let Err(e) = app_context.catalogo.cargar().await {
        error!("Error: {}", e);
    }
    let valor_dolar = app_context.catalogo.actualizar_valor_dolar().await;
    if valor_dolar.is_none() {
        warn!("Warning: precios solo en CLP");
    }

    for pelota in app_context.catalogo.pelotas().await {
        let precio_usd = valor_dolar
            .and_then(|dolar| pelota.precio_usd(dolar))
            .map(|usd| format!(" / USD {usd}"))
            .unwrap_or_default();

        println!(
            "{:>3}  {:<14} {:<10} {:<11} ${} CLP{}  (stock {})",
            pelota.id,
            pelota.nombre,
            pelota.marca,
            pelota.deporte,
            pelota.precio.trunc(),
            precio_usd,
            pelota.stock,
        );
    }
}
