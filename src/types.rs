mod fingerprint;
mod key_id;
mod key_traits;
mod mpi;
mod packet;
mod params;
mod password;
mod s2k;

pub use self::{
    fingerprint::Fingerprint,
    key_id::KeyId,
    key_traits::KeyDetails,
    mpi::{Mpi, MAX_EXTERN_MPI_BITS},
    packet::*,
    params::*,
    password::Password,
    s2k::{GnuExtension, S2kParams, StringToKey, StringToKeyType},
};
