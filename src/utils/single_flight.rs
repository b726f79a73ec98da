//! Guardia single-flight por registro
//!
//! Marca consultiva: mientras una operación destructiva sobre un
//! registro está en curso, otra sobre el mismo registro se rechaza.
//! La marca se libera al soltar el guard, con éxito o con error.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Clave de la operación en curso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightKey {
    /// Creación pendiente; todavía no hay id, se numera por envío
    Draft(u64),
    Record(i64),
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightKey::Draft(n) => write!(f, "new listing #{}", n),
            FlightKey::Record(id) => write!(f, "listing {}", id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    in_flight: Arc<Mutex<HashSet<FlightKey>>>,
    next_draft: Arc<AtomicU64>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar la clave; `None` si ya hay una operación en curso
    pub fn try_begin(&self, key: FlightKey) -> Option<FlightGuard> {
        let mut set = self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !set.insert(key) {
            return None;
        }
        Some(FlightGuard {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Clave propia para cada creación; dos envíos distintos no chocan
    pub fn begin_draft(&self) -> FlightGuard {
        loop {
            let key = FlightKey::Draft(self.next_draft.fetch_add(1, Ordering::Relaxed));
            if let Some(guard) = self.try_begin(key) {
                return guard;
            }
        }
    }

    pub fn is_busy(&self, key: FlightKey) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&key)
    }
}

/// Libera la clave al salir de scope
#[derive(Debug)]
pub struct FlightGuard {
    key: FlightKey,
    in_flight: Arc<Mutex<HashSet<FlightKey>>>,
}

impl FlightGuard {
    pub fn key(&self) -> FlightKey {
        self.key
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        set.remove(&self.key);
    }
}
