pub mod pace_gauge;
pub mod speed_card;
pub mod timer;
pub mod zone_list;
