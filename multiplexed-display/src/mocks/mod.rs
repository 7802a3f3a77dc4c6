pub mod mock_lines;
pub mod mock_time;
