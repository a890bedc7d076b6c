pub mod formatter;

pub use formatter::{
    format_round_table, format_round_tsv, format_rounds_list, format_series_table,
    format_series_tsv, should_use_colors, truncate_name,
};
