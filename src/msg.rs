use serde::{Deserialize, Serialize};

use crate::vote::VoteOption;
use crate::{Error, ProposalId, Result};

pub const GOV_ROUTE: &str = "gov";
pub const BANK_ROUTE: &str = "bank";

/// The capabilities the keeper needs from a message attached to a proposal.
pub trait Msg {
    /// Stateless validation of the message itself.
    fn validate_basic(&self) -> Result<()>;

    /// Addresses (hex encoded) that must authorize this message.
    fn signers(&self) -> Vec<&str>;

    /// Key used by the router to find the handler for this message.
    fn route(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgVote {
    pub proposal_id: ProposalId,
    pub voter: String,
    pub option: VoteOption,
}

impl Msg for MsgVote {
    fn validate_basic(&self) -> Result<()> {
        Ok(())
    }

    fn signers(&self) -> Vec<&str> {
        vec![self.voter.as_str()]
    }

    fn route(&self) -> &str {
        GOV_ROUTE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDeposit {
    pub proposal_id: ProposalId,
    pub depositor: String,
    pub amount: u128,
}

impl Msg for MsgDeposit {
    fn validate_basic(&self) -> Result<()> {
        if self.amount == 0 {
            return Err(Error::InvalidProposalMsg(format!(
                "deposit to proposal {} has no amount",
                self.proposal_id
            )));
        }
        Ok(())
    }

    fn signers(&self) -> Vec<&str> {
        vec![self.depositor.as_str()]
    }

    fn route(&self) -> &str {
        GOV_ROUTE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from: String,
    pub to: String,
    pub amount: u128,
}

impl Msg for MsgSend {
    fn validate_basic(&self) -> Result<()> {
        if self.amount == 0 {
            return Err(Error::InvalidProposalMsg("send has no amount".to_string()));
        }
        self.to
            .parse::<crate::Address>()
            .map_err(|e| Error::InvalidProposalMsg(format!("bad recipient {:?}: {e}", self.to)))?;
        Ok(())
    }

    fn signers(&self) -> Vec<&str> {
        vec![self.from.as_str()]
    }

    fn route(&self) -> &str {
        BANK_ROUTE
    }
}

/// A message for a route this crate knows nothing about; its payload is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCustom {
    pub route: String,
    pub signers: Vec<String>,
    pub payload: Vec<u8>,
}

impl Msg for MsgCustom {
    fn validate_basic(&self) -> Result<()> {
        Ok(())
    }

    fn signers(&self) -> Vec<&str> {
        self.signers.iter().map(String::as_str).collect()
    }

    fn route(&self) -> &str {
        &self.route
    }
}

/// An action a proposal executes once it passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Vote(MsgVote),
    Deposit(MsgDeposit),
    Send(MsgSend),
    Custom(MsgCustom),
}

impl Action {
    fn as_msg(&self) -> &dyn Msg {
        match self {
            Action::Vote(m) => m,
            Action::Deposit(m) => m,
            Action::Send(m) => m,
            Action::Custom(m) => m,
        }
    }
}

impl Msg for Action {
    fn validate_basic(&self) -> Result<()> {
        self.as_msg().validate_basic()
    }

    fn signers(&self) -> Vec<&str> {
        self.as_msg().signers()
    }

    fn route(&self) -> &str {
        self.as_msg().route()
    }
}

impl From<MsgVote> for Action {
    fn from(m: MsgVote) -> Self {
        Action::Vote(m)
    }
}

impl From<MsgDeposit> for Action {
    fn from(m: MsgDeposit) -> Self {
        Action::Deposit(m)
    }
}

impl From<MsgSend> for Action {
    fn from(m: MsgSend) -> Self {
        Action::Send(m)
    }
}

impl From<MsgCustom> for Action {
    fn from(m: MsgCustom) -> Self {
        Action::Custom(m)
    }
}
