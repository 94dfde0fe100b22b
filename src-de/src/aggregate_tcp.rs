//! Multi-process all-gather over TCP.
//!
//! Rank 0 listens and every other rank connects once, announcing its rank as
//! a little-endian `u32`. A gather round is: each peer sends one `f64`, the
//! root answers every peer with a `u32` count followed by the values in rank
//! order. Reads block without timeout.

use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::aggregate::Aggregator;
use crate::error::{JadeError, Result};

const CONNECT_ATTEMPTS: usize = 300;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(100);

enum Role {
    Root { peers: Vec<TcpStream> },
    Peer { stream: TcpStream },
}

pub struct TcpAggregator {
    rank: usize,
    participants: usize,
    role: Role,
}

impl TcpAggregator {
    /// Bind `addr` as rank 0 and wait for the other `participants - 1` ranks
    pub fn bind<A: ToSocketAddrs>(addr: A, participants: usize) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Self::from_listener(listener, participants)
    }

    /// Rank 0 on an already bound listener
    pub fn from_listener(listener: TcpListener, participants: usize) -> Result<Self> {
        let participants = participants.max(1);
        let mut slots: Vec<Option<TcpStream>> = (1..participants).map(|_| None).collect();
        for _ in 1..participants {
            let (mut stream, peer_addr) = listener.accept()?;
            stream.set_nodelay(true)?;
            let rank = stream.read_u32::<LittleEndian>()? as usize;
            if rank == 0 || rank >= participants {
                return Err(JadeError::Transport(format!(
                    "peer {} announced rank {} outside 1..{}",
                    peer_addr, rank, participants
                )));
            }
            if slots[rank - 1].is_some() {
                return Err(JadeError::Transport(format!("rank {} connected twice", rank)));
            }
            log::debug!("rank {} joined from {}", rank, peer_addr);
            slots[rank - 1] = Some(stream);
        }
        let peers = slots.into_iter().flatten().collect();
        Ok(Self { rank: 0, participants, role: Role::Root { peers } })
    }

    /// Join the collective rooted at `addr` as `rank` (> 0), retrying while
    /// the root is not listening yet.
    pub fn connect<A: ToSocketAddrs>(addr: A, rank: usize, participants: usize) -> Result<Self> {
        if rank == 0 || rank >= participants {
            return Err(JadeError::Transport(format!(
                "rank {} outside 1..{} for a connecting peer",
                rank, participants
            )));
        }
        let addrs: Vec<_> = addr.to_socket_addrs()?.collect();
        let mut last_err = None;
        for _ in 0..CONNECT_ATTEMPTS {
            match TcpStream::connect(&addrs[..]) {
                Ok(mut stream) => {
                    stream.set_nodelay(true)?;
                    stream.write_u32::<LittleEndian>(rank as u32)?;
                    stream.flush()?;
                    return Ok(Self { rank, participants, role: Role::Peer { stream } });
                }
                Err(e) => {
                    last_err = Some(e);
                    thread::sleep(CONNECT_RETRY_DELAY);
                }
            }
        }
        Err(JadeError::Transport(format!(
            "could not reach coordinator: {}",
            last_err.map(|e| e.to_string()).unwrap_or_else(|| "no address".to_string())
        )))
    }

    pub fn participants(&self) -> usize {
        self.participants
    }
}

impl Aggregator for TcpAggregator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn all_gather(&mut self, value: f64) -> Result<Vec<f64>> {
        let participants = self.participants;
        match &mut self.role {
            Role::Root { peers } => {
                let mut values = Vec::with_capacity(participants);
                values.push(value);
                for stream in peers.iter_mut() {
                    values.push(stream.read_f64::<LittleEndian>()?);
                }
                for stream in peers.iter_mut() {
                    let mut out = BufWriter::new(&*stream);
                    out.write_u32::<LittleEndian>(values.len() as u32)?;
                    for v in &values {
                        out.write_f64::<LittleEndian>(*v)?;
                    }
                    out.flush()?;
                }
                Ok(values)
            }
            Role::Peer { stream } => {
                stream.write_f64::<LittleEndian>(value)?;
                stream.flush()?;
                let mut input = BufReader::new(&*stream);
                let count = input.read_u32::<LittleEndian>()? as usize;
                if count != participants {
                    return Err(JadeError::Transport(format!(
                        "root sent {} values, expected {}",
                        count, participants
                    )));
                }
                (0..count).map(|_| input.read_f64::<LittleEndian>().map_err(JadeError::from)).collect()
            }
        }
    }
}
