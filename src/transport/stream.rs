//! Transports over `std::io::Write` sinks.

use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use crate::transport::{Transport, TransportError};

/// Transport over any blocking writer (files, pipes, sockets).
#[derive(Debug)]
pub struct StreamTransport<W> {
    writer: Option<W>,
}

impl<W: Write + Send> StreamTransport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Flush and hand back the writer, leaving the transport closed.
    fn take_flushed(&mut self) -> io::Result<Option<W>> {
        match self.writer.take() {
            Some(mut writer) => {
                writer.flush()?;
                Ok(Some(writer))
            }
            None => Ok(None),
        }
    }
}

impl<W: Write + Send> Transport for StreamTransport<W> {
    fn write(&mut self, record: &[u8]) -> Result<usize, TransportError> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "transport is closed"))?;

        // A single write call: partial acceptance must surface as a short write.
        Ok(writer.write(record)?)
    }

    fn close(&mut self) -> io::Result<()> {
        self.take_flushed().map(drop)
    }
}

/// Transport writing to a connected client socket.
#[derive(Debug)]
pub struct TcpTransport {
    inner: StreamTransport<TcpStream>,
    peer: SocketAddr,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        let peer = stream.peer_addr()?;
        stream.set_nodelay(true)?;
        Ok(Self {
            inner: StreamTransport::new(stream),
            peer,
        })
    }

    pub fn connect(addr: SocketAddr) -> io::Result<Self> {
        Self::new(TcpStream::connect(addr)?)
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl Transport for TcpTransport {
    fn write(&mut self, record: &[u8]) -> Result<usize, TransportError> {
        self.inner.write(record)
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(stream) = self.inner.take_flushed()? {
            match stream.shutdown(Shutdown::Both) {
                // Peer already went away.
                Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
                other => other?,
            }
            tracing::debug!(peer = %self.peer, "TCP transport closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;

    #[test]
    fn writes_reach_the_underlying_buffer() {
        let mut transport = StreamTransport::new(Vec::new());
        assert_eq!(transport.write(b"abcd").unwrap(), 4);
        assert_eq!(transport.writer.as_deref(), Some(&b"abcd"[..]));
    }

    #[test]
    fn write_after_close_is_fatal() {
        let mut transport = StreamTransport::new(Vec::new());
        transport.close().unwrap();
        assert!(transport.is_closed());

        let err = transport.write(b"late").unwrap_err();
        assert!(err.is_fatal());
        // Closing twice is harmless.
        transport.close().unwrap();
    }

    #[test]
    fn tcp_transport_delivers_and_closes() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let mut transport = TcpTransport::connect(addr).unwrap();
        let (mut peer, _) = listener.accept().unwrap();
        assert_eq!(transport.peer(), addr);

        assert_eq!(transport.write(b"record").unwrap(), 6);
        transport.close().unwrap();

        let mut received = Vec::new();
        peer.read_to_end(&mut received).unwrap();
        assert_eq!(received, b"record");
    }
}
