//! Operational scripts run against a deployed chain.
//!
//! Each script resolves its targets from the address book. Scripts that
//! change state come with a read-only counterpart where one is useful, so
//! the change can be previewed.

mod capacitors;
pub use capacitors::{capacitor_mismatches, sync_capacitors, CapacitorMismatch};

mod fees;
pub use fees::set_gas_price;

mod limits;
pub use limits::{
    set_attest_gas_limit, set_execution_overhead, set_path_tripped, set_propose_gas_limit,
};

mod native;
pub use native::relay_native;

mod packets;
pub use packets::{next_packets, packet_paths, render_packets, PacketPath, PendingPacket};

mod roles;
pub use roles::{grant_roles, pending_grants, roles_of, PendingGrant};
