//! Booking lifecycle and the effect each status change has on room availability.
//!
//! A booking starts out `confirmed`, which holds its room unavailable. Moving it to
//! `cancelled` or `completed` releases the room, provided no other booking in a
//! [`BookingStatus::room_holding`] status still references it. The admin override accepts any
//! target status, but setting `confirmed` again never re-reserves the room.

use crate::model::{auth::Identity, id::UserId};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter, Default)]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
    Completed,
}

/// What a status change does to the referenced room's availability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityEffect {
    /// Set the room's availability back to `true`.
    Release,
    /// Leave the room's availability untouched.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
    pub availability: AvailabilityEffect,
}

impl BookingStatus {
    pub fn holds_room(self) -> bool {
        self == BookingStatus::Confirmed
    }

    /// Statuses that keep the referenced room unavailable.
    pub fn room_holding() -> Vec<BookingStatus> {
        BookingStatus::iter().filter(|s| s.holds_room()).collect()
    }

    /// Status change requested through the admin override. No source/target pair is rejected.
    pub fn admin_transition(self, to: BookingStatus) -> StatusTransition {
        let availability = match to {
            BookingStatus::Confirmed => AvailabilityEffect::Keep,
            BookingStatus::Cancelled | BookingStatus::Completed => AvailabilityEffect::Release,
        };
        StatusTransition {
            from: self,
            to,
            availability,
        }
    }

    /// Cancellation requested by the owner or an admin.
    pub fn cancel(self) -> AppResult<StatusTransition> {
        match self {
            BookingStatus::Cancelled => {
                Err(AppError::Conflict("Booking already cancelled".into()))
            }
            from => Ok(StatusTransition {
                from,
                to: BookingStatus::Cancelled,
                availability: AvailabilityEffect::Release,
            }),
        }
    }
}

// 所有者チェックを先に行い、その後でキャンセル済みかどうかを見る
pub fn authorize_cancellation(
    owner: UserId,
    current: BookingStatus,
    requested_by: &Identity,
) -> AppResult<StatusTransition> {
    if !requested_by.can_manage(owner) {
        return Err(AppError::ForbiddenOperation);
    }
    current.cancel()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use std::str::FromStr;
    use BookingStatus::*;

    const ALL: [BookingStatus; 3] = [Confirmed, Cancelled, Completed];

    #[test]
    fn status_strings_are_lowercase() {
        assert_eq!(Confirmed.as_ref(), "confirmed");
        assert_eq!(BookingStatus::from_str("completed").unwrap(), Completed);
        assert!(BookingStatus::from_str("pending").is_err());
        assert_eq!(BookingStatus::default(), Confirmed);
    }

    #[test]
    fn only_confirmed_holds_room() {
        assert!(Confirmed.holds_room());
        assert!(!Cancelled.holds_room());
        assert!(!Completed.holds_room());
        assert_eq!(BookingStatus::room_holding(), vec![Confirmed]);
    }

    #[test]
    fn admin_transition_to_terminal_status_releases_room() {
        for from in ALL {
            for to in [Cancelled, Completed] {
                let t = from.admin_transition(to);
                assert_eq!(t.availability, AvailabilityEffect::Release, "{from:?} -> {to:?}");
                assert_eq!(t.from, from);
                assert_eq!(t.to, to);
            }
        }
    }

    #[test]
    fn admin_transition_to_confirmed_keeps_availability() {
        for from in ALL {
            assert_eq!(
                from.admin_transition(Confirmed).availability,
                AvailabilityEffect::Keep
            );
        }
    }

    // 未決事項: キャンセル済みの予約を確定に戻しても部屋は予約不可に戻らない。
    // 意図した仕様かどうかはプロダクト側の判断待ちなので、現状の挙動を固定しておく
    #[test]
    fn reconfirming_released_booking_leaves_room_available() {
        let t = Cancelled.admin_transition(Confirmed);
        assert!(t.to.holds_room());
        assert_eq!(t.availability, AvailabilityEffect::Keep);
    }

    #[test]
    fn cancel_rejects_already_cancelled() {
        assert!(matches!(Cancelled.cancel(), Err(AppError::Conflict(_))));
        for from in [Confirmed, Completed] {
            let t = from.cancel().unwrap();
            assert_eq!(t.to, Cancelled);
            assert_eq!(t.availability, AvailabilityEffect::Release);
        }
    }

    #[test]
    fn cancellation_requires_owner_or_admin() {
        let owner = UserId::new();
        let stranger = Identity::new(UserId::new(), Role::User);
        let admin = Identity::new(UserId::new(), Role::Admin);

        assert!(matches!(
            authorize_cancellation(owner, Confirmed, &stranger),
            Err(AppError::ForbiddenOperation)
        ));
        assert!(authorize_cancellation(owner, Confirmed, &admin).is_ok());
        assert!(authorize_cancellation(owner, Confirmed, &Identity::new(owner, Role::User)).is_ok());
    }

    #[test]
    fn ownership_is_checked_before_cancelled_state() {
        let owner = UserId::new();
        let stranger = Identity::new(UserId::new(), Role::User);
        assert!(matches!(
            authorize_cancellation(owner, Cancelled, &stranger),
            Err(AppError::ForbiddenOperation)
        ));
    }
}
