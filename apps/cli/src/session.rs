//! # Shell Session
//!
//! Owns the catalog and the cart for one run of the shell and turns parsed
//! [`Command`]s into cart calls and printed output.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  prompt ──► read line ──► Command::parse ──► Session::execute           │
//! │    ▲            │               │                   │                   │
//! │    │           EOF             Err                  ├── Continue ──┐    │
//! │    │            │               │                   └── Exit ──────┼──► │
//! │    │            ▼               ▼                                  │    │
//! │    │          return     "Error: ..." (recoverable)                │    │
//! │    └───────────────────────────┴───────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use simcart_core::{CartItem, Catalog, PricingRules, ShoppingCart};
use tracing::{debug, info, warn};

use crate::commands::{help_text, Command};
use crate::config::CliConfig;
use crate::error::CliError;

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One interactive shell session.
pub struct Session {
    catalog: Catalog,
    cart: ShoppingCart,
    config: CliConfig,
}

impl Session {
    pub fn new(catalog: Catalog, rules: PricingRules, config: CliConfig) -> Self {
        Session {
            catalog,
            cart: ShoppingCart::new(rules),
            config,
        }
    }

    pub fn cart(&self) -> &ShoppingCart {
        &self.cart
    }

    /// Reads commands until `exit` or end of input.
    ///
    /// Recoverable errors are printed and the loop continues; fatal ones
    /// (terminal I/O) are returned. Input that is not UTF-8 is decoded
    /// lossily and goes through the normal command path.
    pub fn run<R, W>(&mut self, mut input: R, mut out: W) -> Result<(), CliError>
    where
        R: BufRead,
        W: Write,
    {
        info!(products = self.catalog.len(), "Session started");
        let mut buf = Vec::new();

        loop {
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(out)?;
                debug!("End of input");
                break;
            }
            let line = String::from_utf8_lossy(&buf);

            let outcome = Command::parse(&line, self.config.max_quantity)
                .and_then(|command| match command {
                    Some(command) => self.execute(command, &mut out),
                    None => Ok(Flow::Continue),
                });

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) if !err.is_fatal() => {
                    warn!(input = %line.trim(), error = %err, "Command failed");
                    writeln!(out, "Error: {}", err)?;
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            lines = self.cart.items_added().len(),
            cart_started = %self.cart.created_at(),
            "Session ended"
        );
        Ok(())
    }

    /// Runs a single command.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, CliError> {
        debug!(?command, "Executing");

        match command {
            Command::Help(topic) => {
                writeln!(out, "{}", help_text(topic.as_deref()))?;
            }
            Command::Catalog => {
                write!(out, "{}", self.catalog)?;
                writeln!(out)?;
            }
            Command::Add { item_id, quantity } => {
                let product = self.catalog.get(item_id)?.clone();
                self.cart.add(CartItem::new(product, quantity));
            }
            Command::Remove { item_id, quantity } => {
                let product = self.catalog.get(item_id)?.clone();
                self.cart.remove(&CartItem::new(product, quantity));
            }
            Command::Promo(code) => {
                self.cart.add_promo_code(code);
            }
            Command::Clear => {
                self.cart.clear();
            }
            Command::Cart => self.render_cart(out)?,
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    fn render_cart<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.cart.is_empty() {
            return writeln!(out, "You haven't added any item to your cart.");
        }

        let summary = self.cart.summary();

        writeln!(out, "You've added,")?;
        for item in &summary.added {
            writeln!(out, "{} x {}", item.quantity, item.product.name)?;
        }
        writeln!(out)?;
        writeln!(out, "Total Price is {}", summary.total)?;
        writeln!(out)?;
        writeln!(out, "Your total item(s):")?;
        for item in &summary.items {
            writeln!(out, "{} x {}", item.quantity, item.product.name)?;
        }
        writeln!(out)
    }
}
