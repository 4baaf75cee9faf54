use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::auth::CredentialCache;
use crate::config::AppConfig;
use crate::protocol::responses::{self, format_response};
use crate::session::{SessionRegistry, handle_session};

pub struct Server {
    registry: Arc<Mutex<SessionRegistry>>,
    credentials: Arc<CredentialCache>,
    listener: TcpListener,
    config: Arc<AppConfig>,
}

impl Server {
    /// Binds the listening socket. The credential table is not read until
    /// the first session needs it.
    pub async fn bind(config: AppConfig) -> std::io::Result<Self> {
        let socket = config.listen_socket();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e);
            }
        };
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            registry: Arc::new(Mutex::new(SessionRegistry::new(config.max_clients))),
            credentials: Arc::new(CredentialCache::new(config.users_file_path())),
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(&self) {
        info!(
            "Starting RAX Gallery on {} (max {} clients, credentials from {})",
            self.config.listen_socket(),
            self.config.max_clients,
            self.credentials.path().display()
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let registry = Arc::clone(&self.registry);
                    let credentials = Arc::clone(&self.credentials);
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each client so accept loop doesn't block
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_new_client(stream, addr, registry, credentials, config).await
                        {
                            warn!("Failed to handle client {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

/// Admits a new client if there is room, runs its session, then deregisters it.
async fn handle_new_client(
    mut stream: TcpStream,
    client_addr: SocketAddr,
    registry: Arc<Mutex<SessionRegistry>>,
    credentials: Arc<CredentialCache>,
    config: Arc<AppConfig>,
) -> std::io::Result<()> {
    let admitted = {
        let mut sessions = registry.lock().await;
        let admitted = sessions.try_register(client_addr);
        if admitted {
            info!(
                "Client connected: {} ({}/{} clients)",
                client_addr,
                sessions.len(),
                sessions.max_sessions()
            );
        } else {
            warn!(
                "Rejecting {}: {} sessions already active",
                client_addr,
                sessions.len()
            );
        }
        admitted
    };

    if !admitted {
        stream
            .write_all(
                format_response(
                    responses::SERVICE_UNAVAILABLE,
                    "Too many connections. Try again later.",
                )
                .as_bytes(),
            )
            .await?;
        return Ok(());
    }

    let result = handle_session(stream, client_addr, credentials, config.max_command_length).await;

    let mut sessions = registry.lock().await;
    if let Some(duration) = sessions.remove(&client_addr) {
        info!(
            "Client {} disconnected after {:.1}s",
            client_addr,
            duration.as_secs_f64()
        );
    }

    result
}
