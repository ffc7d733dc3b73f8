//! Machine serialization.
//!
//! Two encodings share the same in-memory machine: a structured JSON
//! record stream, and a source-literal text block reproducing the cipher
//! engine's internal constant initializer byte for byte. The literal
//! encoding is order- and whitespace-sensitive because downstream tooling
//! parses it by position, not by name.
//!
//! Output is buffered fully in memory and handed to the sink only after
//! the whole machine serialized, so a failure mid-encoding never leaves a
//! partial file behind.

use std::io;
use std::io::Write;

use crate::error::ProformaError;
use crate::machine::MachineElement;
use crate::permutator::Permutator;
use crate::rotor::Rotor;

/// Indentation carried by every element record in the literal encoding.
const PREFIX: &str = "\t\t";

/// Hex values emitted per line in the literal encoding.
const BYTES_PER_LINE: usize = 16;

/// Output encoding for a generated machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Ordered JSON array of kind-tagged element records.
    Json,
    /// Engine constant initializer text, hex literals 16 per line.
    SourceLiteral,
}

/// Serializes `machine` in the chosen format and writes it to `sink`.
///
/// The JSON encoding carries every generated field as decimal integers
/// and byte arrays, one kind-tagged record per element, in assembly
/// order. The source-literal encoding emits the rotor group and the
/// permutator group the downstream engine splices into its source;
/// counter elements carry no generated state and appear only in JSON.
///
/// # Errors
/// Returns [`ProformaError::Sink`] if the sink rejects the write.
pub fn write_machine<W: Write>(
    machine: &[MachineElement],
    format: OutputFormat,
    sink: &mut W,
) -> Result<(), ProformaError> {
    let buf = match format {
        OutputFormat::Json => encode_json(machine)?,
        OutputFormat::SourceLiteral => encode_source(machine).into_bytes(),
    };
    sink.write_all(&buf)?;
    sink.flush()?;
    Ok(())
}

fn encode_json(machine: &[MachineElement]) -> Result<Vec<u8>, ProformaError> {
    let mut buf = serde_json::to_vec(machine).map_err(io::Error::from)?;
    buf.push(b'\n');
    Ok(buf)
}

fn encode_source(machine: &[MachineElement]) -> String {
    let mut out = String::new();
    out.push_str(
        "\tproformaRotors = []*Rotor{\n\t\t// Define the proforma \
         rotors used to create the actual rotors to use.\n",
    );
    for element in machine {
        if let MachineElement::Rotor(rotor) = element {
            push_rotor(&mut out, rotor);
            out.push_str(",\n");
        }
    }
    out.push_str("\t}\n");
    out.push_str(
        "\tproformaPermutator = &Permutator{\n\t\t// Define the \
         proforma permutator used to create the actual permutator to use.\n",
    );
    for element in machine {
        if let MachineElement::Permutator(permutator) = element {
            push_permutator(&mut out, permutator);
            out.push_str(",\n");
        }
    }
    out.push_str("\t}\n");
    out
}

fn push_rotor(out: &mut String, rotor: &Rotor) {
    out.push_str(PREFIX);
    out.push_str("{\n");
    out.push_str(&format!("{}\tsize:    {},\n", PREFIX, rotor.size));
    out.push_str(&format!("{}\tstart:   {},\n", PREFIX, rotor.start));
    out.push_str(&format!("{}\tstep:    {},\n", PREFIX, rotor.step));
    out.push_str(&format!("{}\tcurrent: {},\n", PREFIX, rotor.current));
    out.push_str(PREFIX);
    out.push_str("\trotor:   []byte{\n");
    push_byte_lines(out, &rotor.rotor, "}}");
}

fn push_permutator(out: &mut String, permutator: &Permutator) {
    out.push_str(PREFIX);
    out.push_str("{\n");
    out.push_str(&format!(
        "{}\tcurrentState:  {},\n",
        PREFIX, permutator.current_state
    ));
    out.push_str(&format!(
        "{}\tmaximalStates: {},\n",
        PREFIX, permutator.maximal_states
    ));
    out.push_str(PREFIX);
    out.push_str("\tcycles: []Cycle{\n");
    for cycle in &permutator.cycles {
        out.push_str(&format!(
            "{}\t\t{{start: {}, length: {}, current: {}}},\n",
            PREFIX, cycle.start, cycle.length, cycle.current
        ));
    }
    out.push_str(PREFIX);
    out.push_str("\t},\n");
    out.push_str(PREFIX);
    out.push_str("\trandp: []byte{\n");
    push_byte_lines(out, &permutator.randp, "},\n");
    out.push_str(PREFIX);
    out.push_str("\tbitPerm: [256]byte{\n");
    push_byte_lines(out, &permutator.bit_perm, "}}");
}

/// Emits `bytes` as `0x` + two-hex-digit literals, 16 per line; the final
/// value is followed by `close` instead of the usual separator.
fn push_byte_lines(out: &mut String, bytes: &[u8], close: &str) {
    let lines = bytes.len().div_ceil(BYTES_PER_LINE);
    for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        out.push_str(PREFIX);
        out.push_str("\t\t");
        let last_line = line + 1 == lines;
        for (pos, &value) in chunk.iter().enumerate() {
            let last_value = pos + 1 == chunk.len();
            if last_line && last_value {
                out.push_str(&format!("{:#04x}{}", value, close));
            } else if last_value {
                out.push_str(&format!("{:#04x},\n", value));
            } else {
                out.push_str(&format!("{:#04x}, ", value));
            }
        }
    }
}
