//! storegate server entry point
//!
//! ```text
//! storegate [--env dev|prod] [--port 8080]
//! ```

use std::sync::Arc;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn main() {
    let env = get_env();
    let mut config = storegate::config::AppConfig::load(&env);
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let _log_guard = storegate::logging::init_logging(&config);
    tracing::info!("Starting storegate in {} mode", env);

    let rt = tokio::runtime::Runtime::new().expect("Failed to start tokio runtime");
    rt.block_on(async {
        let db = match storegate::Database::connect(&config.postgres_url).await {
            Ok(db) => Arc::new(db),
            Err(e) => {
                eprintln!("FATAL: PostgreSQL connection failed: {}", e);
                eprintln!("  Check postgres_url in config/{}.yaml", env);
                std::process::exit(1);
            }
        };

        storegate::gateway::run_server(&config, db).await;
    });
}
