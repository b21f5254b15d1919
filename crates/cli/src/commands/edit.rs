//! `cartkit edit` - apply edits to a cart and optionally commit them.
//!
//! Edits are applied through a [`CartSession`] exactly as a view would apply
//! clicks. With `--commit` the payload is handed to a saver that writes it to
//! stdout: the raw `[{id, quantity}]` list, or `cartLinesUpdate` line input
//! when the cart came from Shopify.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use cartkit::{CartConfig, CartError, CartSaver, CartSession, CommitPayload, RawCart, SaveError};

use super::{CommandError, InputFormat};

/// A single shopper edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Increment(String),
    Decrement(String),
    Delete(String),
}

impl FromStr for EditOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <inc|dec|del>:<line id>, got '{s}'"))?;
        if id.is_empty() {
            return Err(format!("missing line id in '{s}'"));
        }

        match kind {
            "inc" | "+" => Ok(Self::Increment(id.to_owned())),
            "dec" | "-" => Ok(Self::Decrement(id.to_owned())),
            "del" | "rm" => Ok(Self::Delete(id.to_owned())),
            other => Err(format!("unknown edit '{other}', expected inc, dec or del")),
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increment(id) => write!(f, "inc:{id}"),
            Self::Decrement(id) => write!(f, "dec:{id}"),
            Self::Delete(id) => write!(f, "del:{id}"),
        }
    }
}

/// Saver that writes the payload as pretty JSON.
struct JsonSaver<'a, W: Write> {
    out: RefCell<&'a mut W>,
    format: InputFormat,
}

impl<W: Write> CartSaver for JsonSaver<'_, W> {
    async fn save(&self, payload: &CommitPayload) -> Result<(), SaveError> {
        let mut out = self.out.borrow_mut();
        match self.format {
            InputFormat::Raw => serde_json::to_writer_pretty(&mut **out, payload),
            InputFormat::Shopify => {
                serde_json::to_writer_pretty(&mut **out, &payload.to_line_updates())
            }
        }
        .map_err(SaveError::new)?;
        writeln!(out).map_err(SaveError::new)
    }
}

/// Apply `ops` in order, stopping at the first failure.
pub fn apply(session: &mut CartSession, ops: &[EditOp]) -> Result<(), CartError> {
    for op in ops {
        let line = match op {
            EditOp::Increment(id) => session.increment(id)?,
            EditOp::Decrement(id) => session.decrement(id)?,
            EditOp::Delete(id) => session.delete_line(id)?,
        };
        tracing::info!(quantity = line.quantity(), "Applied {op}");
    }
    Ok(())
}

/// Normalize `raw`, apply `ops`, write the resulting state and, if
/// `commit` is set, the commit payload.
pub async fn run(
    raw: &RawCart,
    config: &CartConfig,
    ops: &[EditOp],
    commit: bool,
    format: InputFormat,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut session = CartSession::new(*config);
    session.replace_cart(raw)?;
    apply(&mut session, ops)?;

    let state = session.state().ok_or(CartError::NoCart)?;
    serde_json::to_writer_pretty(&mut *out, state)?;
    writeln!(out)?;

    if commit {
        let saver = JsonSaver {
            out: RefCell::new(out),
            format,
        };
        session.update_cart(&saver).await?;
    }
    Ok(())
}
