/// Date format accepted for every start/end date argument
pub const DATE_FORMAT: &str = "%Y-%m-%d";
