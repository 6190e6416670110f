use std::net::IpAddr;

use axum_server::Handle;

use https_dev_server::config::Config;
use https_dev_server::{net, server};

#[tokio::main]
async fn main() {
    // Setup logging
    env_logger::init();

    let config = Config::default();

    // Informational only; binding always uses config.host.
    let display_ip = net::local_ip().unwrap_or(config.fallback_ip);

    let listener = server::bind_listener(&config)
        .unwrap_or_else(|err| panic!("failed to bind {}: {}", config.bind_addr(), err));
    let tls = server::load_tls(&config)
        .await
        .expect("failed to load TLS config from cert.pem/key.pem");

    print_banner(&config, display_ip);

    let handle = Handle::new();
    tokio::spawn({
        let handle = handle.clone();
        async move {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            // No graceful drain: stop accepting and let in-flight
            // connections be cut, matching Ctrl-C expectations.
            handle.shutdown();
        }
    });

    server::serve(listener, tls, config.root.clone(), handle)
        .await
        .expect("server error");

    println!("\nServer stopped.");
}

fn print_banner(config: &Config, display_ip: IpAddr) {
    println!("HTTPS server started");
    println!("Local access:   https://localhost:{}", config.port);
    println!("Network access: https://{}:{}", display_ip, config.port);
    println!();
    println!("The certificate is self-signed, so the browser will show a warning.");
    println!("Click 'Advanced' -> 'Proceed to localhost (unsafe)' to continue.");
    println!();
    println!("For an Android tablet:");
    println!("  1. Open Chrome at https://{}:{}", display_ip, config.port);
    println!("  2. Accept the security certificate");
    println!("  3. Allow camera permissions");
}
