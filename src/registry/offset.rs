use crate::{error::DiscoveryError, registry::symbols::SymbolRecord};

/// Distance between where the executable was linked and where it was loaded.
///
/// Position independent executables are loaded at a base address chosen at
/// runtime, so the addresses in the symbol table are off by that base. The
/// offset is measured once on an anchor symbol whose runtime address is known
/// and then applied to every other recorded address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressOffset(usize);

impl AddressOffset {
    pub const ZERO: Self = Self(0);

    /// Measure the offset on the first defined record named `anchor`.
    pub fn resolve(
        records: &[SymbolRecord],
        anchor: &str,
        runtime_address: usize,
    ) -> Result<Self, DiscoveryError> {
        let recorded = records
            .iter()
            .filter(|record| record.name == anchor)
            .find_map(|record| record.address)
            .ok_or_else(|| DiscoveryError::AnchorNotFound {
                anchor: anchor.to_owned(),
            })?;

        let offset = Self(runtime_address.wrapping_sub(recorded));
        tracing::debug!(
            anchor,
            recorded,
            runtime_address,
            offset = offset.0,
            "resolved address offset"
        );
        Ok(offset)
    }

    /// Translate a recorded address into its runtime address.
    pub const fn apply(self, recorded: usize) -> usize {
        recorded.wrapping_add(self.0)
    }
}
