//! Administrative statements. Database names are always backtick-quoted.

pub fn create_database(db: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS `{db}`")
}

pub fn use_database(db: &str) -> String {
    format!("USE `{db}`")
}

/// Forces a round trip on a fresh connection.
pub const SERVER_VERSION: &str = "SELECT SERVER_VERSION()";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_database_names() {
        assert_eq!(create_database("power"), "CREATE DATABASE IF NOT EXISTS `power`");
        assert_eq!(use_database("power"), "USE `power`");
    }
}
