pub mod placements;
