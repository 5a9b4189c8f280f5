use std::sync::Arc;

use loanflow::config::{load_config, print_schema};
use loanflow::shell::ConsoleShell;
use loanflow::startup;
use loanflow::utils::logger::init_logging;
use tracing::info;

#[tokio::main]
async fn main() {
    // "schema" dumps the config JSON schema and exits.
    if std::env::args().nth(1).as_deref() == Some("schema") {
        print_schema();
        return;
    }

    let config = Arc::new(load_config());
    init_logging(&config.logging);

    let shell = Arc::new(ConsoleShell::new());
    match startup::bootstrap(config, shell).await {
        Ok((state, landing)) => {
            let logged_in = state.session.is_logged_in().await;
            info!(logged_in, path = landing.path(), "client ready");
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start client");
            std::process::exit(1);
        }
    }
}
