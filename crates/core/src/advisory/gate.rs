//! Advisory gate evaluation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::types::{Acknowledgment, Advisory, AdvisorySeverity};

/// Why an advisory blocked the posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// A restriction-severity advisory is active on a scope.
    Restricted,
    /// An advisory requires acknowledgment and none is current.
    AcknowledgmentRequired,
}

/// Outcome of the advisory gate.
#[derive(Debug, Clone)]
pub enum AdvisoryDecision {
    /// No active advisory blocks the posting.
    Allowed,
    /// An advisory blocks the posting.
    Blocked {
        /// The blocking advisory.
        advisory: Advisory,
        /// Why it blocks.
        reason: BlockReason,
    },
}

impl AdvisoryDecision {
    /// Returns true if the posting may proceed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Returns true if the advisory is active at `now`.
///
/// Active means `effective_start_at <= now < effective_end_at`, with either
/// bound optional.
#[must_use]
pub fn is_active(advisory: &Advisory, now: DateTime<Utc>) -> bool {
    if advisory.effective_start_at.is_some_and(|start| now < start) {
        return false;
    }
    if advisory.effective_end_at.is_some_and(|end| now >= end) {
        return false;
    }
    true
}

/// Evaluates all advisories on the affected scopes for the acting user.
///
/// Advisories are considered in severity order, highest first, so a
/// restriction always wins over an acknowledgeable advisory on the same
/// scopes. An acknowledgment is current only when it was recorded at or
/// after the advisory's `updated_at` - editing an advisory invalidates all
/// older acknowledgments.
#[must_use]
pub fn evaluate(
    advisories: &[Advisory],
    prior_acknowledgments: &[Acknowledgment],
    acknowledged_advisory_ids: &[Uuid],
    user_id: Uuid,
    now: DateTime<Utc>,
) -> AdvisoryDecision {
    let mut active: Vec<&Advisory> = advisories
        .iter()
        .filter(|advisory| is_active(advisory, now))
        .collect();
    active.sort_by(|a, b| b.severity.cmp(&a.severity));

    for advisory in active {
        match advisory.severity {
            AdvisorySeverity::Restriction => {
                return AdvisoryDecision::Blocked {
                    advisory: advisory.clone(),
                    reason: BlockReason::Restricted,
                };
            }
            AdvisorySeverity::RequiresAcknowledgment => {
                if acknowledged_advisory_ids.contains(&advisory.id) {
                    continue;
                }

                let has_current_acknowledgment = prior_acknowledgments.iter().any(|ack| {
                    ack.advisory_id == advisory.id
                        && ack.user_id == user_id
                        && ack.acknowledged_at >= advisory.updated_at
                });

                if !has_current_acknowledgment {
                    return AdvisoryDecision::Blocked {
                        advisory: advisory.clone(),
                        reason: BlockReason::AcknowledgmentRequired,
                    };
                }
            }
            AdvisorySeverity::Info | AdvisorySeverity::Notice => {}
        }
    }

    AdvisoryDecision::Allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn advisory(severity: AdvisorySeverity, updated_at: DateTime<Utc>) -> Advisory {
        Advisory {
            id: Uuid::new_v4(),
            severity,
            title: "Hold on account".to_string(),
            effective_start_at: None,
            effective_end_at: None,
            updated_at,
        }
    }

    #[test]
    fn test_no_advisories_allows() {
        let decision = evaluate(&[], &[], &[], Uuid::new_v4(), Utc::now());
        assert!(decision.is_allowed());
    }

    #[test]
    fn test_restriction_blocks_unconditionally() {
        let now = Utc::now();
        let restriction = advisory(AdvisorySeverity::Restriction, now);
        let user = Uuid::new_v4();

        // Even acknowledging the advisory id does not unblock a restriction.
        let decision = evaluate(
            std::slice::from_ref(&restriction),
            &[],
            &[restriction.id],
            user,
            now,
        );
        assert!(matches!(
            decision,
            AdvisoryDecision::Blocked {
                reason: BlockReason::Restricted,
                ..
            }
        ));
    }

    #[test]
    fn test_requires_acknowledgment_blocks_without_ack() {
        let now = Utc::now();
        let adv = advisory(AdvisorySeverity::RequiresAcknowledgment, now);

        let decision = evaluate(&[adv], &[], &[], Uuid::new_v4(), now);
        assert!(matches!(
            decision,
            AdvisoryDecision::Blocked {
                reason: BlockReason::AcknowledgmentRequired,
                ..
            }
        ));
    }

    #[test]
    fn test_in_request_acknowledgment_unblocks() {
        let now = Utc::now();
        let adv = advisory(AdvisorySeverity::RequiresAcknowledgment, now);
        let id = adv.id;

        let decision = evaluate(&[adv], &[], &[id], Uuid::new_v4(), now);
        assert!(decision.is_allowed());
    }

    #[test]
    fn test_fresh_prior_acknowledgment_unblocks() {
        let now = Utc::now();
        let adv = advisory(AdvisorySeverity::RequiresAcknowledgment, now - Duration::days(2));
        let user = Uuid::new_v4();
        let ack = Acknowledgment {
            advisory_id: adv.id,
            user_id: user,
            acknowledged_at: now - Duration::days(1),
        };

        let decision = evaluate(&[adv], &[ack], &[], user, now);
        assert!(decision.is_allowed());
    }

    #[test]
    fn test_stale_acknowledgment_does_not_unblock() {
        // The advisory was edited after the acknowledgment was recorded.
        let now = Utc::now();
        let adv = advisory(AdvisorySeverity::RequiresAcknowledgment, now - Duration::hours(1));
        let user = Uuid::new_v4();
        let ack = Acknowledgment {
            advisory_id: adv.id,
            user_id: user,
            acknowledged_at: now - Duration::days(1),
        };

        let decision = evaluate(&[adv], &[ack], &[], user, now);
        assert!(matches!(
            decision,
            AdvisoryDecision::Blocked {
                reason: BlockReason::AcknowledgmentRequired,
                ..
            }
        ));
    }

    #[test]
    fn test_other_users_acknowledgment_does_not_unblock() {
        let now = Utc::now();
        let adv = advisory(AdvisorySeverity::RequiresAcknowledgment, now - Duration::days(2));
        let ack = Acknowledgment {
            advisory_id: adv.id,
            user_id: Uuid::new_v4(),
            acknowledged_at: now - Duration::days(1),
        };

        let decision = evaluate(&[adv], &[ack], &[], Uuid::new_v4(), now);
        assert!(!decision.is_allowed());
    }

    #[test]
    fn test_lower_severities_never_block() {
        let now = Utc::now();
        let advisories = vec![
            advisory(AdvisorySeverity::Info, now),
            advisory(AdvisorySeverity::Notice, now),
        ];

        let decision = evaluate(&advisories, &[], &[], Uuid::new_v4(), now);
        assert!(decision.is_allowed());
    }

    #[test]
    fn test_restriction_wins_over_acknowledgeable() {
        let now = Utc::now();
        let ackable = advisory(AdvisorySeverity::RequiresAcknowledgment, now);
        let restriction = advisory(AdvisorySeverity::Restriction, now);
        let ack_id = ackable.id;

        let decision = evaluate(
            &[ackable, restriction],
            &[],
            &[ack_id],
            Uuid::new_v4(),
            now,
        );
        assert!(matches!(
            decision,
            AdvisoryDecision::Blocked {
                reason: BlockReason::Restricted,
                ..
            }
        ));
    }

    #[test]
    fn test_expired_advisory_is_inactive() {
        let now = Utc::now();
        let mut adv = advisory(AdvisorySeverity::Restriction, now);
        adv.effective_end_at = Some(now - Duration::hours(1));

        assert!(!is_active(&adv, now));
        let decision = evaluate(&[adv], &[], &[], Uuid::new_v4(), now);
        assert!(decision.is_allowed());
    }

    #[test]
    fn test_future_advisory_is_inactive() {
        let now = Utc::now();
        let mut adv = advisory(AdvisorySeverity::Restriction, now);
        adv.effective_start_at = Some(now + Duration::hours(1));

        assert!(!is_active(&adv, now));
    }

    #[test]
    fn test_end_bound_is_exclusive() {
        let now = Utc::now();
        let mut adv = advisory(AdvisorySeverity::Restriction, now);
        adv.effective_end_at = Some(now);

        assert!(!is_active(&adv, now));
    }
}
