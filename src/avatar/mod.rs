//! Avatar customization: buying and equipping cosmetic items with XP.

pub mod economy;

pub use economy::{
    buy_item, can_afford, equip_item, is_earned, is_equipped, meets_unlock, owns_item,
    unlock_requirement_text, EconomyError,
};
