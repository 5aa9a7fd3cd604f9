pub mod gauge;
pub mod player_bar;
pub mod song_list;
pub mod spinner;
