mod test_data;

#[cfg(test)]
mod tests {
    use rusty_warpscript::{
        desanitize, sanitize, Cell, DataFrame, Gts, GtsValue, ScriptValue, Stack, StackItem,
        Warpscript,
    };

    use super::*;

    #[test]
    fn test_sanitize_fixtures() {
        let test_data = &test_data::TEST_DATA;
        assert_eq!(test_data.sanitize_cases.len(), 19);

        for case in &test_data.sanitize_cases {
            let value = ScriptValue::from(case.v.clone());
            assert_eq!(sanitize(&value), case.e, "for input {}", case.v);
        }
    }

    #[test]
    fn test_fetch_response() {
        let _ = env_logger::builder().is_test(true).try_init();
        let response = test_data::TEST_DATA.fetch_response.clone();

        let stack = Stack::from_json(response).unwrap();
        assert_eq!(stack.len(), 1);

        let frame = match stack.into_single().unwrap() {
            StackItem::Table(frame) => frame,
            other => panic!("expected a table, got {:?}", other),
        };

        assert_eq!(frame.len(), 3);
        assert_eq!(
            frame.column_names(),
            vec!["timestamps", "values", "classname", "host", "room"]
        );

        // Rows are sorted by timestamp, so the parlor sample sits in the
        // middle, and timestamps past one day since the epoch show up as
        // date times.
        match frame.cell("timestamps", 0) {
            Some(Cell::Timestamp(date_time)) => {
                assert_eq!(date_time.to_string(), "2020-01-01 00:00:00");
            }
            other => panic!("expected a timestamp cell, got {:?}", other),
        }
        assert_eq!(frame.cell("values", 1), Some(&Cell::Double(19.0)));
        assert_eq!(
            frame.cell("room", 1),
            Some(&Cell::Str("parlor".to_string()))
        );
        assert_eq!(frame.cell("values", 2), Some(&Cell::Double(21.6)));
    }

    #[test]
    fn test_mixed_response() {
        let response = test_data::TEST_DATA.mixed_response.clone();

        let stack = Stack::from_json(response).unwrap();
        assert_eq!(stack.len(), 3);

        let items = stack.items();
        assert_eq!(items[0].as_json(), Some(&serde_json::json!(42)));
        assert_eq!(items[1].as_json(), Some(&serde_json::json!("foo")));

        let gts = items[2].as_gts().unwrap();
        assert_eq!(gts.classname, "metric");
        assert_eq!(gts.labels["foo"], "bar");
        assert_eq!(gts.attributes["owner"], "tests");
        assert_eq!(gts.samples.len(), 2);
    }

    /// Rebuilds the JSON the server would answer with for a GTS.
    fn gts_to_json(gts: &Gts) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = gts
            .samples
            .iter()
            .map(|sample| {
                let value = match &sample.value {
                    GtsValue::Long(long) => serde_json::json!(long),
                    GtsValue::Double(double) => serde_json::json!(double),
                    GtsValue::Bool(b) => serde_json::json!(b),
                    GtsValue::String(string) => serde_json::json!(string),
                };
                serde_json::json!([sample.timestamp, value])
            })
            .collect();
        serde_json::json!({
            "c": gts.classname.clone(),
            "l": gts.labels.clone(),
            "a": gts.attributes.clone(),
            "la": 0,
            "v": rows,
        })
    }

    #[test]
    fn test_dataframe_round_trip() {
        let mut frame = DataFrame::new();
        frame.push_column(
            "timestamps",
            (0..5).map(|i| Cell::Long(i * 1_000_000)).collect(),
        );
        frame.push_column("values", (0..5).map(|i| Cell::Long(i * 10)).collect());
        frame.push_column(
            "room",
            ["kitchen", "kitchen", "kitchen", "parlor", "parlor"]
                .iter()
                .map(|room| Cell::Str(room.to_string()))
                .collect(),
        );

        // Split the frame into series, push them through the server's JSON
        // shape, and flatten them back.
        let series = frame.to_gts_list("timestamps", "values").unwrap();
        assert_eq!(series.len(), 2);

        for gts in &series {
            let rebuilt = rusty_warpscript::read_gts(&gts_to_json(gts)).unwrap();
            assert_eq!(&rebuilt, gts);
        }

        let response = serde_json::Value::Array(series.iter().map(gts_to_json).collect());
        match desanitize(response) {
            StackItem::Table(rebuilt) => assert_eq!(rebuilt, frame),
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn test_uploading_a_gts() {
        let mut gts = Gts::new("temperature").with_label("room", "kitchen");
        gts.samples.push(rusty_warpscript::GtsSample::new(
            1577836800000000,
            GtsValue::Double(21.5),
        ));

        let mut ws = Warpscript::with_endpoint("127.0.0.1", 8080);
        ws.call(vec![gts.into()], "UPDATE");
        assert_eq!(
            ws.warpscript(),
            "NEWGTS 'temperature' RENAME { 'room' 'kitchen' } RELABEL\n\
             1577836800000000 NaN NaN NaN 21.5 ADDVALUE UPDATE\n"
        );
    }

    #[test]
    fn test_loading_a_script_file() {
        let path = std::env::temp_dir().join("rusty-warpscript-integration.mc2");
        std::fs::write(&path, "$token AUTHENTICATE\nNOW").unwrap();

        let mut ws = Warpscript::with_endpoint("127.0.0.1", 8080);
        ws.load_with(&path, vec![("token", "secret".into())])
            .unwrap();
        assert_eq!(
            ws.warpscript(),
            "'secret' 'token' STORE\n$token AUTHENTICATE\nNOW\n"
        );

        std::fs::remove_file(&path).ok();
    }

    /*#[test]
    fn test_exec_against_a_live_server() {
        // Example against a local Warp 10, or the SenX sandbox
        let mut ws = Warpscript::with_endpoint("https://sandbox.senx.io", 8080);
        let stack = ws.script(3i64).exec().unwrap();
        println!("stack: {:?}", stack);
    }*/
}
