use core::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

use crate::msg::Action;
use crate::timestamp::Timestamp;
use crate::{Address, Error, Result};

pub type ProposalId = u64;

pub const MAX_TITLE_LEN: usize = 140;
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    DepositPeriod,
    VotingPeriod,
    Passed,
    Rejected,
    Failed,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProposalStatus::Passed | ProposalStatus::Rejected | ProposalStatus::Failed
        )
    }

    /// Statuses only ever move forward: deposit, voting, then a terminal outcome.
    pub fn can_transition_to(&self, next: ProposalStatus) -> bool {
        match self {
            ProposalStatus::DepositPeriod => next == ProposalStatus::VotingPeriod,
            ProposalStatus::VotingPeriod => next.is_terminal(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    Text {
        title: String,
        description: String,
    },
    SoftwareUpgrade {
        title: String,
        description: String,
        name: String,
        height: u64,
    },
    CommunityPoolSpend {
        title: String,
        description: String,
        recipient: Address,
        amount: u128,
    },
}

impl Content {
    pub fn text(title: impl Into<String>, description: impl Into<String>) -> Self {
        Content::Text {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Content::Text { title, .. }
            | Content::SoftwareUpgrade { title, .. }
            | Content::CommunityPoolSpend { title, .. } => title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Content::Text { description, .. }
            | Content::SoftwareUpgrade { description, .. }
            | Content::CommunityPoolSpend { description, .. } => description,
        }
    }

    pub fn proposal_type(&self) -> &'static str {
        match self {
            Content::Text { .. } => "Text",
            Content::SoftwareUpgrade { .. } => "SoftwareUpgrade",
            Content::CommunityPoolSpend { .. } => "CommunityPoolSpend",
        }
    }

    /// Content level checks. The keeper does not call this on submission,
    /// it is left to whoever builds the content.
    pub fn validate_basic(&self) -> Result<()> {
        let title = self.title();
        if title.trim().is_empty() {
            return Err(Error::InvalidProposalContent("title is blank".to_string()));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(Error::InvalidProposalContent(format!(
                "title is {} bytes, at most {MAX_TITLE_LEN} allowed",
                title.len()
            )));
        }

        let description = self.description();
        if description.trim().is_empty() {
            return Err(Error::InvalidProposalContent(
                "description is blank".to_string(),
            ));
        }
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(Error::InvalidProposalContent(format!(
                "description is {} bytes, at most {MAX_DESCRIPTION_LEN} allowed",
                description.len()
            )));
        }

        match self {
            Content::Text { .. } => Ok(()),
            Content::SoftwareUpgrade { name, height, .. } => {
                if name.trim().is_empty() {
                    Err(Error::InvalidProposalContent("upgrade has no name".to_string()))
                } else if *height == 0 {
                    Err(Error::InvalidProposalContent(
                        "upgrade height must be positive".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            Content::CommunityPoolSpend { amount, .. } => {
                if *amount == 0 {
                    Err(Error::InvalidProposalContent(
                        "spend has no amount".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub content: Content,
    pub messages: Vec<Action>,
    pub status: ProposalStatus,
    pub submit_time: Timestamp,
    pub deposit_end_time: Timestamp,
    pub total_deposit: u128,
    /// `None` exactly while the proposal is in its deposit period.
    pub voting_start_time: Option<Timestamp>,
    pub voting_end_time: Option<Timestamp>,
}

impl Debug for Proposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}-{:?}-{}({:?})",
            self.id,
            self.status,
            self.content.proposal_type(),
            self.content.title()
        )
    }
}

impl Proposal {
    /// A fresh proposal in its deposit period.
    pub fn new(
        id: ProposalId,
        content: Content,
        messages: Vec<Action>,
        submit_time: Timestamp,
        deposit_end_time: Timestamp,
    ) -> Self {
        Self {
            id,
            content,
            messages,
            status: ProposalStatus::DepositPeriod,
            submit_time,
            deposit_end_time,
            total_deposit: 0,
            voting_start_time: None,
            voting_end_time: None,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions_are_monotonic() {
        use ProposalStatus::*;
        assert!(DepositPeriod.can_transition_to(VotingPeriod));
        assert!(!DepositPeriod.can_transition_to(Passed));
        assert!(VotingPeriod.can_transition_to(Passed));
        assert!(VotingPeriod.can_transition_to(Rejected));
        assert!(VotingPeriod.can_transition_to(Failed));
        assert!(!VotingPeriod.can_transition_to(DepositPeriod));
        for terminal in [Passed, Rejected, Failed] {
            assert!(!terminal.can_transition_to(VotingPeriod));
            assert!(!terminal.can_transition_to(DepositPeriod));
        }
    }

    #[test]
    fn test_content_validation() {
        assert!(Content::text("title", "description").validate_basic().is_ok());
        assert!(matches!(
            Content::text("", "description").validate_basic(),
            Err(Error::InvalidProposalContent(_))
        ));
        assert!(matches!(
            Content::text("1234567890".repeat(100), "description").validate_basic(),
            Err(Error::InvalidProposalContent(_))
        ));
        assert!(matches!(
            Content::text("title", "").validate_basic(),
            Err(Error::InvalidProposalContent(_))
        ));
        let upgrade = Content::SoftwareUpgrade {
            title: "upgrade".to_string(),
            description: "v2".to_string(),
            name: "v2".to_string(),
            height: 0,
        };
        assert_eq!(upgrade.proposal_type(), "SoftwareUpgrade");
        assert!(upgrade.validate_basic().is_err());
    }

    #[test]
    fn test_encoding() -> Result<()> {
        let p = Proposal::new(
            3,
            Content::text("title", "description"),
            vec![],
            Timestamp::from_secs(1),
            Timestamp::from_secs(2),
        );
        assert_eq!(Proposal::from_bytes(&p.to_bytes()?)?, p);
        assert!(Proposal::from_bytes(&[1, 2, 3]).is_err());
        Ok(())
    }
}
