//! Evaluate a formula or condition against a stored actor.

use anyhow::Result;
use clap::Parser;
use console::style;

use swnr_core::{Expression, Value};

use crate::context::Dirs;

/// Evaluate a pool formula against an actor
#[derive(Parser)]
pub struct Eval {
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Expression, e.g. "@level + max(@stats.wis.mod, @stats.con.mod)"
    #[arg(value_name = "EXPR")]
    expression: String,

    /// Treat the expression as a grant condition
    #[arg(long)]
    condition: bool,
}

impl Eval {
    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let config = dirs.content().load_config()?;
        let runtime = dirs.runtime().await?;
        let actor = runtime.handle().actor(self.actor.as_str()).await?;
        runtime.shutdown().await?;

        let scope = actor.scope(&config);
        let expression = Expression::parse(&self.expression, &config.limits)?;

        if self.condition {
            let result = expression.condition_value(&scope)?;
            println!("{} {}", style("=").bold().cyan(), result);
            return Ok(());
        }

        let raw = match expression.evaluate(&scope)? {
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
        };
        let value = expression.formula_value(&scope)?;
        println!("{} {}", style("raw").dim(), raw);
        println!("{} {}", style("=").bold().cyan(), value);
        Ok(())
    }
}
