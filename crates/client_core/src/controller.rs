use std::sync::Arc;

use shared::{
    commands::{endpoint_for_port, parse_connect, HELLO_COMMAND, TITLE_COMMAND},
    protocol::{ResponseEnvelope, ResponsePart, StyledSpan},
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::{
    error::ClientError,
    render::Renderer,
    session::SessionToken,
    surface::{TitleSurface, TranscriptSurface},
    transport::Transport,
};

pub type SharedRenderer<S> = Arc<Mutex<Renderer<S>>>;

struct Handshake {
    title_ok: bool,
    hello: Result<ResponseEnvelope, ClientError>,
}

/// Routes input lines to the server and their results into the renderer.
pub struct ConnectionController<S> {
    transport: Arc<dyn Transport>,
    session: SessionToken,
    endpoint: RwLock<Option<String>>,
    renderer: SharedRenderer<S>,
}

impl<S> ConnectionController<S>
where
    S: TranscriptSurface + TitleSurface + Send,
{
    pub fn new(
        transport: Arc<dyn Transport>,
        session: SessionToken,
        renderer: SharedRenderer<S>,
    ) -> Self {
        Self {
            transport,
            session,
            endpoint: RwLock::new(None),
            renderer,
        }
    }

    pub fn renderer(&self) -> &SharedRenderer<S> {
        &self.renderer
    }

    pub fn session(&self) -> &SessionToken {
        &self.session
    }

    pub async fn endpoint(&self) -> Option<String> {
        self.endpoint.read().await.clone()
    }

    /// Points the client at `localhost:<port>` and runs the `/title` + `/hello` handshake.
    ///
    /// A failed `/title` is rendered as a connection error and never returned. The `/hello`
    /// result is returned as is.
    pub async fn connect(&self, port: &str) -> Result<ResponseEnvelope, ClientError> {
        self.handshake(port).await.hello
    }

    /// Sends `input`, handling `/connect` locally.
    pub async fn interact(&self, input: &str) -> Result<ResponseEnvelope, ClientError> {
        match parse_connect(input) {
            Some(Some(port)) => self.connect(port).await,
            Some(None) => Ok(connect_usage_envelope()),
            None => self.send(input).await,
        }
    }

    /// Connects on startup and renders whatever `/hello` returns.
    pub async fn bootstrap(&self, port: &str) {
        self.connect_and_render(port).await;
    }

    pub async fn echo(&self, line: &str) {
        self.renderer.lock().await.render_command_echo(line);
    }

    /// Runs one submitted line and renders its outcome, including failures.
    pub async fn dispatch(&self, line: &str) {
        // A failed handshake already rendered its own error.
        if let Some(Some(port)) = parse_connect(line) {
            self.connect_and_render(port).await;
            return;
        }
        let outcome = self.interact(line).await;
        self.render_outcome(outcome).await;
    }

    async fn connect_and_render(&self, port: &str) {
        let handshake = self.handshake(port).await;
        match handshake.hello {
            Err(err) if !handshake.title_ok => {
                debug!(%err, "hello failed after reported connection failure");
            }
            outcome => self.render_outcome(outcome).await,
        }
    }

    async fn handshake(&self, port: &str) -> Handshake {
        let endpoint = endpoint_for_port(port);
        *self.endpoint.write().await = Some(endpoint.clone());
        info!(%endpoint, "connecting");

        let title_ok = match self.send(TITLE_COMMAND).await {
            Ok(envelope) => {
                match envelope.title() {
                    Some(title) => {
                        info!(title, "display title updated");
                        self.renderer.lock().await.surface_mut().set_title(title);
                    }
                    None => debug!("title response carried no text"),
                }
                true
            }
            Err(err) => {
                warn!(%err, %endpoint, "handshake failed");
                self.render(&connect_failure_envelope(&endpoint)).await;
                false
            }
        };

        Handshake {
            title_ok,
            hello: self.send(HELLO_COMMAND).await,
        }
    }

    async fn send(&self, command: &str) -> Result<ResponseEnvelope, ClientError> {
        let endpoint = self.endpoint().await.ok_or(ClientError::NotConnected)?;
        self.transport.send(&endpoint, command, &self.session).await
    }

    async fn render_outcome(&self, outcome: Result<ResponseEnvelope, ClientError>) {
        match outcome {
            Ok(envelope) => self.render(&envelope).await,
            Err(err) => {
                warn!(%err, "command failed");
                self.render(&command_failure_envelope(&err)).await;
            }
        }
    }

    async fn render(&self, envelope: &ResponseEnvelope) {
        self.renderer.lock().await.render(envelope);
    }
}

pub fn connect_failure_envelope(endpoint: &str) -> ResponseEnvelope {
    ResponseEnvelope::single(ResponsePart::new(vec![
        StyledSpan::bold("ERROR: "),
        StyledSpan::plain("Failed to connect to the server: "),
        StyledSpan::bold(endpoint),
        StyledSpan::plain("\n\nThe server needs to be started first. "),
        StyledSpan::plain("This client only tries to connect to a local server."),
        StyledSpan::plain("\n\nRestart the client or type /connect (port) to retry!"),
    ]))
}

pub fn command_failure_envelope(err: &ClientError) -> ResponseEnvelope {
    ResponseEnvelope::single(ResponsePart::new(vec![
        StyledSpan::bold("ERROR: "),
        StyledSpan::plain(err.to_string()),
    ]))
}

fn connect_usage_envelope() -> ResponseEnvelope {
    ResponseEnvelope::single(ResponsePart::new(vec![
        StyledSpan::bold("ERROR: "),
        StyledSpan::plain("missing port. Usage: "),
        StyledSpan::bold("/connect <port>"),
    ]))
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
