//! Interactive till session.
//!
//! Reads product codes line by line, scans them into a `CashRegister`, and
//! prints the receipt when asked. Generic over input and output so the
//! whole conversation can be driven from tests.

use crate::catalog::Catalog;
use crate::error::{RegisterError, Result};
use crate::receipt::{banner, CURRENCY};
use crate::register::CashRegister;
use console::Style;
use log::{debug, info};
use std::io::{BufRead, Write};

/// What one line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the receipt and stop.
    Receipt,

    /// Stop without a receipt.
    Exit,

    /// Scan these upper-cased codes in order.
    Scan(Vec<String>),
}

impl Command {
    /// Parses a line: quotes are ignored, keywords are case-insensitive, and
    /// codes are separated by commas and/or whitespace.
    pub fn parse(line: &str) -> Command {
        let cleaned = line.replace('"', "").trim().to_lowercase();
        match cleaned.as_str() {
            "receipt" => Command::Receipt,
            "exit" => Command::Exit,
            _ => Command::Scan(
                cleaned
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(str::to_uppercase)
                    .collect(),
            ),
        }
    }
}

/// One till conversation writing to `out`.
pub struct Session<'c, W: Write> {
    register: CashRegister<'c>,
    out: W,
}

impl<'c, W: Write> Session<'c, W> {
    pub fn new(catalog: &'c Catalog, out: W) -> Self {
        Session {
            register: CashRegister::new(catalog),
            out,
        }
    }

    pub fn register(&self) -> &CashRegister<'c> {
        &self.register
    }

    /// Runs until `receipt`, `exit`, or end of input.
    ///
    /// Unknown codes are reported and the session continues. A misconfigured
    /// discount on a scanned product surfaces when the receipt is built and
    /// ends the session with an error.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.show_available_products()?;

        let mut lines = input.lines();
        let wants_receipt = loop {
            self.show_prompt()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    debug!("End of input, leaving without receipt");
                    break false;
                }
            };

            match Command::parse(&line) {
                Command::Receipt => break true,
                Command::Exit => break false,
                Command::Scan(codes) => {
                    for code in &codes {
                        self.scan(code)?;
                    }
                    if !self.register.cart().is_empty() {
                        self.show_cart()?;
                    }
                }
            }
        };

        if wants_receipt {
            self.print_receipt()?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn scan(&mut self, code: &str) -> Result<()> {
        match self.register.scan(code) {
            Ok((product, _)) => {
                let scanned = format!("{} Scanned", product.name());
                writeln!(self.out, "{}", Style::new().blue().apply_to(scanned))?;
                Ok(())
            }
            Err(RegisterError::ProductNotFound { .. }) => {
                // Terminal bell
                write!(self.out, "\x07")?;
                writeln!(
                    self.out,
                    "{}",
                    Style::new()
                        .red()
                        .apply_to("Invalid product code. Please try again.")
                )?;
                self.show_available_products()
            }
            Err(e) => Err(e),
        }
    }

    fn show_available_products(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", banner(" Available Products "))?;
        for product in self.register.catalog().iter() {
            writeln!(
                self.out,
                "{}: {:<31} {:>8} {}",
                product.code(),
                product.name(),
                product.price(),
                CURRENCY
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn show_prompt(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "Enter one or more comma- or space-separated product codes to scan."
        )?;
        writeln!(
            self.out,
            "Enter \"receipt\" to show receipt or \"exit\" to quit."
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn show_cart(&mut self) -> Result<()> {
        let catalog = self.register.catalog();
        let contents: Vec<String> = self
            .register
            .cart()
            .iter()
            .map(|(code, quantity)| {
                let name = catalog.get(code).map(|p| p.name()).unwrap_or(code);
                format!("{} {}", quantity, name)
            })
            .collect();

        writeln!(self.out, "{}", banner(" Products in the cart "))?;
        writeln!(self.out, "{}", contents.join(", "))?;
        Ok(())
    }

    fn print_receipt(&mut self) -> Result<()> {
        match self.register.receipt()? {
            Some(receipt) => receipt.write_to(&mut self.out)?,
            None => info!("Receipt requested for an empty cart"),
        }
        Ok(())
    }
}
