//! Shared helpers for tests: in-process fake upstreams and payloads

use axum::Router;

/// Serve `router` on an ephemeral localhost port, returning its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub mod fixtures {
    use serde_json::{json, Value};

    /// SDMX-JSON message shaped like the OECD Economic Outlook answer
    ///
    /// Areas: USA, CHN, DEU, JPN, IND, GBR, FRA (unmapped).
    /// Measures: GDPV_ANNPCT, CPI, UNR, CBGDPR, GGFLQ.
    /// Periods: 2022, 2023, 2024-Q1, 2024.
    pub fn oecd_payload() -> Value {
        let areas = ["USA", "CHN", "DEU", "JPN", "IND", "GBR", "FRA"];
        let measures = ["GDPV_ANNPCT", "CPI", "UNR", "CBGDPR", "GGFLQ"];
        let periods = ["2022", "2023", "2024-Q1", "2024"];

        let ids = |codes: &[&str]| -> Value {
            Value::Array(codes.iter().map(|c| json!({"id": c, "name": c})).collect())
        };

        json!({
            "meta": {"schema": "sdmx-json-data"},
            "data": {
                "structures": [{
                    "dimensions": {
                        "dataSet": [],
                        "series": [
                            {"id": "REF_AREA", "keyPosition": 0, "values": ids(&areas)},
                            {"id": "MEASURE", "keyPosition": 1, "values": ids(&measures)},
                            {"id": "FREQ", "keyPosition": 2, "values": [{"id": "A"}]}
                        ],
                        "observation": [
                            {"id": "TIME_PERIOD", "values": ids(&periods)}
                        ]
                    }
                }],
                "dataSets": [{
                    "action": "Information",
                    "series": {
                        // USA: CPI 100 -> 103, GDP growth, unemployment
                        "0:1:0": {"attributes": [], "observations": {"0": [100.0], "1": [103.0]}},
                        "0:0:0": {"observations": {"0": [2.5, 0], "1": [2.9, 0]}},
                        "0:2:0": {"observations": {"0": [3.6], "1": [3.6], "3": [4.1]}},
                        // CHN: CPI with a single year only
                        "1:1:0": {"observations": {"1": [101.0], "2": [102.0]}},
                        // DEU: quarterly value must not win over 2024
                        "2:2:0": {"observations": {"1": [3.0], "2": [9.9], "3": [3.4]}},
                        "2:4:0": {"observations": {"1": [62.9], "3": [null]}},
                        // GBR: current account
                        "5:3:0": {"observations": {"0": [-2.1], "1": [-3.3]}},
                        // FRA is not tracked
                        "6:0:0": {"observations": {"1": [0.9]}}
                    }
                }]
            }
        })
    }

    /// World Bank `[metadata, rows]` answer for one indicator
    ///
    /// Every tracked country has data; the US rows are out of order with
    /// 2023 = 7.0 as the latest. Other countries are keyed by `country.id`
    /// only, with a trailing null row for the newest year.
    pub fn worldbank_payload(indicator: &str) -> Value {
        let mut rows = vec![
            json!({"indicator": {"id": indicator}, "country": {"id": "US", "value": "United States"},
                   "countryiso3code": "USA", "date": "2021", "value": 5.0}),
            json!({"indicator": {"id": indicator}, "country": {"id": "US", "value": "United States"},
                   "countryiso3code": "USA", "date": "2023", "value": 7.0}),
            json!({"indicator": {"id": indicator}, "country": {"id": "US", "value": "United States"},
                   "countryiso3code": "USA", "date": "2022", "value": 6.0}),
        ];
        for (code, iso3) in [("CN", "CHN"), ("EU", "EUU"), ("JP", "JPN"), ("IN", "IND"), ("GB", "GBR")] {
            rows.push(json!({"indicator": {"id": indicator}, "country": {"id": code},
                             "countryiso3code": iso3, "date": "2024", "value": null}));
            rows.push(json!({"indicator": {"id": indicator}, "country": {"id": code},
                             "countryiso3code": iso3, "date": "2023", "value": 1.5}));
        }

        let total = rows.len();
        json!([
            {"page": 1, "pages": 1, "per_page": 50, "total": total},
            rows
        ])
    }
}
