pub mod grid;
pub mod session;

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        // Test that all route module constants are accessible
        assert_eq!(super::grid::BUILD_GRID, "build_grid");
        assert_eq!(super::session::LOAD_REVIEW_SESSION, "load_review_session");
        assert_eq!(super::session::SELECT_VARIANT, "select_variant");
    }
}
