use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::application::order_store::OrderStore;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderStatus, Service};
use crate::domain::ports::{Clock, KeyValueStore};
use crate::errors::AppError;

// ── Commands ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fill in the creation form.
    New,
    List,
    Status { id: u64, status: OrderStatus },
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(AppError::Declined("empty command".to_string()));
        };

        match verb.to_lowercase().as_str() {
            "new" | "add" => Ok(Command::New),
            "list" | "ls" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "status" => {
                let (Some(id), Some(status)) = (parts.next(), parts.next()) else {
                    return Err(AppError::Declined(
                        "usage: status <order id> <pending|in_progress|completed>".to_string(),
                    ));
                };
                let id = id.parse::<u64>().map_err(|_| {
                    AppError::Declined(format!("order id must be a number, got '{}'", id))
                })?;
                Ok(Command::Status {
                    id,
                    status: status.parse()?,
                })
            }
            other => Err(AppError::Declined(format!(
                "unknown command '{}', type 'help' for the list of commands",
                other
            ))),
        }
    }
}

const HELP: &str = "\
Commands:
  new                      create an order
  list                     show all orders
  status <id> <status>     set an order's status (pending, in_progress, completed)
  help                     show this message
  quit                     leave";

// ── Rendering ────────────────────────────────────────────────────────────────

pub fn render_order(order: &Order, currency: &str) -> String {
    format!(
        "[{}] {} - {}\n    Service: {} | Weight: {} kg | Total: {}{} | Status: {}",
        order.id,
        order.customer_name,
        order.date,
        order.service,
        order.weight,
        currency,
        order.total,
        order.status
    )
}

pub fn render_orders(orders: &[Order], currency: &str) -> String {
    if orders.is_empty() {
        return "No orders yet.".to_string();
    }
    orders
        .iter()
        .map(|o| render_order(o, currency))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Menu answer: empty picks the default, `1`-`3` pick by position, anything
/// else is read as a service name.
pub fn parse_service_choice(answer: &str) -> Result<Service, DomainError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(Service::default());
    }
    if let Ok(index) = answer.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| Service::ALL.get(i).copied())
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "pick a service between 1 and {}",
                    Service::ALL.len()
                ))
            });
    }
    answer.parse()
}

// ── Session ──────────────────────────────────────────────────────────────────

/// Interactive order form over a line-oriented reader and writer.
pub struct OrderForm<'a, S, C, R, W> {
    store: &'a mut OrderStore<S, C>,
    currency: String,
    input: R,
    output: W,
}

impl<'a, S, C, R, W> OrderForm<'a, S, C, R, W>
where
    S: KeyValueStore,
    C: Clock,
    R: BufRead,
    W: Write,
{
    pub fn new(
        store: &'a mut OrderStore<S, C>,
        currency: impl Into<String>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            currency: currency.into(),
            input,
            output,
        }
    }

    /// Run until `quit` or end of input. Refused requests are reported and the
    /// session continues; storage failures end it.
    pub fn run(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "Laundry orders. Type 'help' for commands.")?;
        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let outcome = match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_recoverable() => {
                    log::debug!("declined: {}", e);
                    writeln!(self.output, "{}", e)?;
                }
                Err(e) => return Err(e),
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Returns `false` when input ran out part-way through.
    pub fn execute(&mut self, command: Command) -> Result<bool, AppError> {
        match command {
            Command::New => self.fill_form(),
            Command::List => {
                let listing = render_orders(self.store.orders(), &self.currency);
                writeln!(self.output, "{}", listing)?;
                Ok(true)
            }
            Command::Status { id, status } => {
                let order = self.store.update_status(id, status)?;
                let rendered = render_order(order, &self.currency);
                writeln!(self.output, "Updated:\n{}", rendered)?;
                Ok(true)
            }
            Command::Help => {
                writeln!(self.output, "{}", HELP)?;
                Ok(true)
            }
            Command::Quit => Ok(false),
        }
    }

    fn fill_form(&mut self) -> Result<bool, AppError> {
        let Some(customer_name) = self.prompt("Customer name: ")? else {
            return Ok(false);
        };

        for (i, service) in Service::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, service.menu_label(&self.currency))?;
        }
        let Some(choice) = self.prompt(&format!("Service [{}]: ", Service::default()))? else {
            return Ok(false);
        };
        let service = parse_service_choice(&choice)?;

        let Some(weight_text) = self.prompt("Weight (kg): ")? else {
            return Ok(false);
        };

        let order = self.store.create_order(NewOrder {
            customer_name: customer_name.trim().to_string(),
            service,
            weight_text,
        })?;
        let rendered = render_order(order, &self.currency);
        writeln!(self.output, "Created:\n{}", rendered)?;
        Ok(true)
    }

    /// `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
