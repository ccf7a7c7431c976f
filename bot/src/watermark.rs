use anyhow::Result;
use std::path::Path;

const WATERMARK_KEY: &str = "last_sale_time";

/// Single-slot store for the last processed sale timestamp (epoch seconds).
///
/// Injected into the relay rather than read from a global so tests can swap
/// in an in-memory slot.
pub(crate) trait WatermarkStore {
    fn get(&self) -> Result<Option<i64>>;
    fn set(&self, timestamp: i64) -> Result<()>;
}

pub(crate) struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }
}

impl WatermarkStore for SledStore {
    fn get(&self) -> Result<Option<i64>> {
        match self.db.get(WATERMARK_KEY)? {
            Some(raw) => {
                let bytes: [u8; 8] = raw.as_ref().try_into()?;
                Ok(Some(i64::from_be_bytes(bytes)))
            }
            None => Ok(None),
        }
    }

    fn set(&self, timestamp: i64) -> Result<()> {
        self.db.insert(WATERMARK_KEY, &timestamp.to_be_bytes())?;
        // Must hit disk before the next tick reads it.
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory stand-in for [`SledStore`].
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        slot: Mutex<Option<i64>>,
    }

    impl MemoryStore {
        pub(crate) fn with_watermark(timestamp: i64) -> Self {
            Self {
                slot: Mutex::new(Some(timestamp)),
            }
        }
    }

    impl WatermarkStore for MemoryStore {
        fn get(&self) -> Result<Option<i64>> {
            Ok(*self.slot.lock().unwrap())
        }

        fn set(&self, timestamp: i64) -> Result<()> {
            *self.slot.lock().unwrap() = Some(timestamp);
            Ok(())
        }
    }

    fn temporary_store() -> SledStore {
        SledStore {
            db: sled::Config::new().temporary(true).open().unwrap(),
        }
    }

    #[test]
    fn starts_empty() {
        assert_eq!(temporary_store().get().unwrap(), None);
    }

    #[test]
    fn roundtrips_the_slot() {
        let store = temporary_store();
        store.set(1632110783).unwrap();
        assert_eq!(store.get().unwrap(), Some(1632110783));

        store.set(1632110790).unwrap();
        assert_eq!(store.get().unwrap(), Some(1632110790));
    }
}
