//! Proforma machine generator for rotor/permutator stream cipher engines.
//!
//! The crate generates the randomized parameter sets (rotors, permutators
//! and counters) a rotor-based cipher engine loads as its initial internal
//! state, and serializes them either as structured JSON records or as the
//! engine's source-literal constant format.
//!
//! # Architecture
//!
//! ```text
//! RandomSource      (capability interface — CSPRNG or secret-keyed stream)
//!     ↓ bounded draws / byte fills
//! RotorBuilder      (size pool, offsets, bit buffer, wraparound slice)
//! PermutatorBuilder (cycle arrangements, byte permutation table)
//!     ↓ fixed slot sequence
//! MachineAssembler  (one generation run over a typed slot layout)
//!     ↓ ordered element list
//! Serializer        (JSON records or engine source-literal text)
//! ```
//!
//! # Examples
//!
//! Generate the reference machine deterministically from a passphrase:
//!
//! ```
//! use proforma::random::KeyedRandom;
//! use proforma::{write_machine, MachineAssembler, OutputFormat, REFERENCE_LAYOUT};
//!
//! let source = KeyedRandom::from_secret(b"my passphrase").unwrap();
//! let machine = MachineAssembler::new(source)
//!     .unwrap()
//!     .assemble(&REFERENCE_LAYOUT)
//!     .unwrap();
//!
//! let mut out = Vec::new();
//! write_machine(&machine, OutputFormat::Json, &mut out).unwrap();
//! assert!(out.starts_with(b"[{\"kind\":\"rotor\""));
//! ```
//!
//! Or draw everything from the operating system CSPRNG:
//!
//! ```
//! use proforma::random::OsRandom;
//! use proforma::{MachineAssembler, REFERENCE_LAYOUT};
//!
//! let machine = MachineAssembler::new(OsRandom::new())
//!     .unwrap()
//!     .assemble(&REFERENCE_LAYOUT)
//!     .unwrap();
//! assert_eq!(machine.len(), 8);
//! ```

#![deny(clippy::all)]

pub mod error;
pub mod random;

mod machine;
mod permutator;
mod rotor;
mod serialize;

pub use machine::{Counter, MachineAssembler, MachineElement, Slot, REFERENCE_LAYOUT};
pub use permutator::{Cycle, Permutator, CYCLE_SIZES};
pub use rotor::{Rotor, StepPolicy, ROTOR_SIZES};
pub use serialize::{write_machine, OutputFormat};
