use anyhow::{anyhow, Result};
use ledger_engine::Ledger;
use serde::Deserialize;
use tracing::info;

/// Command kind from the `op` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Create,
    Deposit,
    Withdraw,
    Transfer,
    Schedule,
    Process,
    Cashback,
}

/// One row of a replay script
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    #[serde(rename = "op")]
    pub kind: CommandKind,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub counterpart: Option<String>,
    /// Amount, or the percent for `cashback`
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub id: Option<String>,
}

impl Command {
    pub fn apply(&self, ledger: &mut Ledger) -> Result<()> {
        match self.kind {
            CommandKind::Create => ledger.create_account(self.account()?)?,
            CommandKind::Deposit => {
                ledger.deposit(self.account()?, self.amount()?)?;
            }
            CommandKind::Withdraw => {
                ledger.withdraw(self.account()?, self.amount()?)?;
            }
            CommandKind::Transfer => {
                ledger.transfer(self.account()?, self.counterpart()?, self.amount()?)?;
            }
            CommandKind::Schedule => ledger.schedule_payment(
                self.account()?,
                self.counterpart()?,
                self.amount()?,
                self.id()?,
            )?,
            CommandKind::Process => {
                let report = ledger.run_scheduled_payments();
                info!(
                    "Scheduled payments: {} executed, {} skipped",
                    report.succeeded.len(),
                    report.skipped.len()
                );
            }
            CommandKind::Cashback => {
                let rebate = ledger.apply_cashback(self.account()?, self.amount()?)?;
                info!("Cashback of {rebate} credited to {}", self.account()?);
            }
        }

        Ok(())
    }

    fn account(&self) -> Result<&str> {
        required(self.account.as_deref(), "account", self.kind)
    }

    fn counterpart(&self) -> Result<&str> {
        required(self.counterpart.as_deref(), "counterpart", self.kind)
    }

    fn id(&self) -> Result<&str> {
        required(self.id.as_deref(), "id", self.kind)
    }

    fn amount(&self) -> Result<i64> {
        self.amount
            .ok_or_else(|| anyhow!("{:?} requires an amount", self.kind))
    }
}

fn required<'a>(value: Option<&'a str>, column: &str, kind: CommandKind) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("{kind:?} requires the {column} column"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(script: &str) -> Vec<Command> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(script.as_bytes())
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_parse_script() {
        let commands = parse(
            "op,account,counterpart,amount,id
             create,acc1,,,
             deposit,acc1,,100,
             schedule,acc1,acc2,60,pay1
             process,,,,",
        );

        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0].kind, CommandKind::Create);
        assert_eq!(commands[1].amount, Some(100));
        assert_eq!(commands[2].id.as_deref(), Some("pay1"));
        assert_eq!(commands[3].account, None);
    }

    #[test]
    fn test_replay_script() {
        let commands = parse(
            "op,account,counterpart,amount,id
             create,acc1,,,
             create,acc2,,,
             deposit,acc1,,100,
             transfer,acc1,acc2,40,
             schedule,acc1,acc2,60,pay1
             process,,,,
             cashback,acc1,,10,",
        );
        let mut ledger = Ledger::new();

        for command in &commands {
            command.apply(&mut ledger).unwrap();
        }

        assert_eq!(ledger.get_balance("acc1").unwrap(), 10);
        assert_eq!(ledger.get_balance("acc2").unwrap(), 100);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let commands = parse(
            "op,account,counterpart,amount,id
             create,acc1,,,
             deposit,acc1,,,",
        );
        let mut ledger = Ledger::new();

        commands[0].apply(&mut ledger).unwrap();
        let err = commands[1].apply(&mut ledger).unwrap_err();

        assert!(err.to_string().contains("requires an amount"));
    }
}
