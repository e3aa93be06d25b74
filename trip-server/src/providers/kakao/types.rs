//! Kakao Mobility directions response DTOs.
//!
//! Most fields are optional: a failed route search still returns a route
//! object, with a non-zero `result_code` and no summary.

use serde::Deserialize;

/// `result_code` of a successful route search.
pub const ROUTE_OK: i32 = 0;

/// Response from `GET /v1/directions`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub trans_id: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub result_code: i32,
    pub result_msg: Option<String>,
    pub summary: Option<Summary>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    /// Metres.
    pub distance: u32,
    /// Seconds.
    pub duration: u32,
    pub fare: Option<Fare>,
}

/// Estimated costs in won.
#[derive(Debug, Clone, Deserialize)]
pub struct Fare {
    pub taxi: Option<u64>,
    pub toll: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub distance: u32,
    pub duration: u32,
    #[serde(default)]
    pub roads: Vec<Road>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Road {
    #[serde(default)]
    pub name: String,
    /// Metres.
    pub distance: u32,
    /// Seconds.
    pub duration: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_successful_route() {
        let json = r#"{
            "trans_id": "0189a",
            "routes": [{
                "result_code": 0,
                "result_msg": "길찾기 성공",
                "summary": {
                    "origin": {"name": "", "x": 126.978, "y": 37.5665},
                    "destination": {"name": "", "x": 129.0422, "y": 35.1151},
                    "priority": "RECOMMEND",
                    "distance": 398512,
                    "duration": 16440,
                    "fare": {"taxi": 412300, "toll": 21400}
                },
                "sections": [{
                    "distance": 398512,
                    "duration": 16440,
                    "roads": [
                        {"name": "세종대로", "distance": 1200, "duration": 300, "traffic_speed": 20.0, "traffic_state": 2, "vertexes": []},
                        {"name": "경부고속도로", "distance": 360000, "duration": 14000, "traffic_speed": 95.0, "traffic_state": 1, "vertexes": []}
                    ]
                }]
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let route = &response.routes[0];
        assert_eq!(route.result_code, ROUTE_OK);
        let summary = route.summary.as_ref().unwrap();
        assert_eq!(summary.distance, 398_512);
        assert_eq!(summary.fare.as_ref().unwrap().toll, Some(21_400));
        assert_eq!(route.sections[0].roads[1].name, "경부고속도로");
    }

    #[test]
    fn deserialize_failed_route() {
        let json = r#"{
            "trans_id": "0189b",
            "routes": [{"result_code": 104, "result_msg": "출발지와 도착지가 5 m 이내로 설정된 경우 경로를 탐색할 수 없음"}]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.routes[0].result_code, 104);
        assert!(response.routes[0].summary.is_none());
        assert!(response.routes[0].sections.is_empty());
    }
}
