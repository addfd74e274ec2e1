use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("websocket error: {0}")]
    WebSocket(Box<tungstenite::Error>),
}

impl From<tungstenite::Error> for ConnectionError {
    fn from(err: tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

/// A data frame received from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

/// Opens duplex channels to an endpoint.
pub trait Transport: Send {
    type Channel: Channel;

    fn connect(
        &mut self,
        url: &str,
    ) -> impl Future<Output = Result<Self::Channel, ConnectionError>> + Send;
}

/// One open duplex channel.
///
/// `recv` yields `None` once the peer has closed the channel.
pub trait Channel: Send {
    fn recv(&mut self) -> impl Future<Output = Option<Result<Frame, ConnectionError>>> + Send;

    fn send(&mut self, text: String) -> impl Future<Output = Result<(), ConnectionError>> + Send;

    fn close(&mut self) -> impl Future<Output = ()> + Send;
}

/// Timer used between reconnect attempts.
pub trait Sleeper: Send {
    fn sleep(&mut self, duration: Duration) -> impl Future<Output = ()> + Send;
}

pub struct WsTransport;

impl Transport for WsTransport {
    type Channel = WsChannel;

    async fn connect(&mut self, url: &str) -> Result<WsChannel, ConnectionError> {
        let (inner, _response) = tokio_tungstenite::connect_async(url).await?;
        Ok(WsChannel { inner })
    }
}

pub struct WsChannel {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Channel for WsChannel {
    async fn recv(&mut self) -> Option<Result<Frame, ConnectionError>> {
        loop {
            match self.inner.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(Frame::Text(text.as_str().to_owned()))),
                Ok(Message::Binary(bytes)) => return Some(Ok(Frame::Binary(bytes.to_vec()))),
                Ok(Message::Close(_)) => return None,
                // Ping/pong are answered by tungstenite itself
                Ok(_) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn send(&mut self, text: String) -> Result<(), ConnectionError> {
        self.inner.send(Message::text(text)).await?;
        Ok(())
    }

    async fn close(&mut self) {
        if let Err(e) = self.inner.close(None).await {
            tracing::debug!(error = %e, "error while closing websocket");
        }
    }
}

pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
