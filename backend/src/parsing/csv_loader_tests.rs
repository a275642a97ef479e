#[cfg(test)]
mod tests {
    use crate::models::dataset::{
        Cell, ColumnValues, EASTING_SENTINEL, MISSING_PLACEHOLDER, NORTHING_SENTINEL,
    };
    use crate::parsing::csv_loader::{load_dataset, parse_dataset, read_table};
    use crate::parsing::error::LoadError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to create a temp CSV file
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_load_basic_file() {
        let csv = "key,grp,assign,LD1,northing,easting\nA,1,2,0.5,100,200\nB,1,3,1.5,110,210\n";
        let temp_file = create_temp_csv(csv);

        let ds = load_dataset(temp_file.path()).unwrap();

        assert_eq!(ds.row_count(), 2);
        assert_eq!(
            ds.column_names(),
            vec!["key", "grp", "assign", "LD1", "northing", "easting"]
        );
        assert!(ds.column("LD1").unwrap().is_numeric());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_dataset(std::path::Path::new("/nonexistent/dir/data.csv"));
        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_grouping_columns_are_text() {
        let ds = parse_dataset(b"grp,assign,v\n1,2,3\n4,5,6\n").unwrap();

        assert_eq!(
            ds.column("grp").unwrap().values,
            ColumnValues::Text(vec!["1".to_string(), "4".to_string()])
        );
        assert!(!ds.column("assign").unwrap().is_numeric());
        assert!(ds.column("v").unwrap().is_numeric());
    }

    #[test]
    fn test_missing_geography_replaced_by_sentinels() {
        let csv = "key,northing,easting\na,1.0,2.0\nb,,\nc,NA,5.0\n";
        let ds = parse_dataset(csv.as_bytes()).unwrap();

        // Row count is preserved: no row is dropped
        assert_eq!(ds.row_count(), 3);
        let northing = ds.column("northing").unwrap().as_numeric().unwrap();
        let easting = ds.column("easting").unwrap().as_numeric().unwrap();
        assert_eq!(northing, &[1.0, NORTHING_SENTINEL, NORTHING_SENTINEL]);
        assert_eq!(easting, &[2.0, EASTING_SENTINEL, 5.0]);
    }

    #[test]
    fn test_missing_values_become_placeholder_text() {
        let csv = "key,score,label\na,1.5,x\nb,,\n";
        let ds = parse_dataset(csv.as_bytes()).unwrap();

        // A numeric column with a gap is stored as text
        match &ds.column("score").unwrap().values {
            ColumnValues::Text(values) => {
                assert_eq!(values, &["1.5".to_string(), MISSING_PLACEHOLDER.to_string()])
            }
            other => panic!("expected text column, got {:?}", other),
        }
        assert_eq!(
            ds.column("label").unwrap().cell(1),
            Cell::Text(MISSING_PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn test_lat_lon_projected_when_no_northing() {
        let csv = "key,lat,lon\na,0,0\nb,,10\n";
        let ds = parse_dataset(csv.as_bytes()).unwrap();

        let northing = ds.column("northing").unwrap().as_numeric().unwrap();
        let easting = ds.column("easting").unwrap().as_numeric().unwrap();
        assert!(northing[0].abs() < 1e-6);
        assert!(easting[0].abs() < 1e-6);
        assert_eq!(northing[1], NORTHING_SENTINEL);
        assert_eq!(easting[1], EASTING_SENTINEL);
    }

    #[test]
    fn test_existing_projection_wins_over_lat_lon() {
        let csv = "key,lat,lon,northing,easting\na,10,10,1,2\n";
        let ds = parse_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.column("northing").unwrap().as_numeric().unwrap(), &[1.0]);
        assert_eq!(ds.columns().len(), 5);
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        assert!(matches!(parse_dataset(b""), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_ragged_rows_are_parse_error() {
        let result = parse_dataset(b"a,b\n1,2\n3\n");
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let result = parse_dataset(b"a,b\n\xff\xfe,1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let table = read_table(b"a,a,b,a\n1,2,3,4\n").unwrap();
        assert_eq!(table.headers, vec!["a", "a.1", "b", "a.2"]);
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let ds = parse_dataset(b"key,lat,lon\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_names(), vec!["key", "lat", "lon", "northing", "easting"]);
    }
}
