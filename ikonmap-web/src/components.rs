pub mod badges;
pub mod detail_panel;
pub mod map_view;
pub mod resort_card;
pub mod sidebar;
pub mod trip_planner;
