//! Roster fetch use case
//!
//! Executes one of two fetch strategies depending on the session capability:
//! a single privileged enumeration, or a per-group fan-out joined client-side.

use crate::ports::directory_gateway::{DirectoryGateway, GatewayError};
use roster_domain::{
    CapabilityState, FetchBranch, GroupRef, RawRecord, RosterKind, strip_data_wrapper,
    unwrap_collection,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort a whole fetch. Individual branch failures are tolerated
/// and only surface here when every branch fails.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("fetch invoked with an unresolved capability")]
    CapabilityUnresolved,

    #[error("privileged enumeration failed: {0}")]
    Enumeration(#[source] GatewayError),

    #[error("group listing failed: {0}")]
    ScopeListing(#[source] GatewayError),

    #[error("all {attempted} group member requests failed")]
    AllBranchesFailed { attempted: usize },
}

/// Fetches raw roster branches according to the resolved capability.
pub struct RosterFetcher<G: DirectoryGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: DirectoryGateway + 'static> RosterFetcher<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetch branches for `kind`. Branches come back in request order so the
    /// downstream merge is deterministic.
    pub async fn fetch(
        &self,
        state: CapabilityState,
        kind: RosterKind,
    ) -> Result<Vec<FetchBranch>, FetchError> {
        match state {
            CapabilityState::Unknown => Err(FetchError::CapabilityUnresolved),
            CapabilityState::Elevated => self.fetch_elevated(kind).await,
            CapabilityState::ScopedFallback => self.fetch_scoped(kind).await,
        }
    }

    /// One privileged call covering the whole center.
    async fn fetch_elevated(&self, kind: RosterKind) -> Result<Vec<FetchBranch>, FetchError> {
        let response = self
            .gateway
            .list_center_members(kind)
            .await
            .map_err(FetchError::Enumeration)?;

        let payload = strip_data_wrapper(response);
        let center_label = payload
            .get("center")
            .and_then(|center| center.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        // the payload keys the collection by population; older endpoints
        // return the collection directly
        let collection = payload
            .get(kind.collection_key())
            .cloned()
            .unwrap_or(payload);
        let records: Vec<RawRecord> = unwrap_collection(collection);

        debug!("elevated enumeration returned {} records", records.len());
        Ok(vec![FetchBranch::elevated(center_label, records)])
    }

    /// Fan out one member request per owned group and join them all.
    async fn fetch_scoped(&self, kind: RosterKind) -> Result<Vec<FetchBranch>, FetchError> {
        let listing = self
            .gateway
            .list_owned_groups()
            .await
            .map_err(FetchError::ScopeListing)?;
        let groups: Vec<GroupRef> = unwrap_collection(listing);

        if groups.is_empty() {
            debug!("caller owns no groups, roster is empty");
            return Ok(Vec::new());
        }

        info!("fanning out {} member requests for {kind}", groups.len());

        let mut join_set = JoinSet::new();
        for (index, group) in groups.into_iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            join_set.spawn(async move {
                let result = gateway.list_group_members(&group.id, kind).await;
                (index, group, result)
            });
        }

        // barrier join: buffer every outcome, then restore request order so
        // the merge never depends on completion order
        let mut settled: Vec<(usize, GroupRef, Result<Value, GatewayError>)> = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(outcome) => settled.push(outcome),
                Err(err) => warn!("branch task join error: {err}"),
            }
        }
        settled.sort_by_key(|(index, _, _)| *index);

        let attempted = settled.len();
        let mut branches = Vec::new();
        for (_, group, result) in settled {
            match result {
                Ok(value) => {
                    let records: Vec<RawRecord> = unwrap_collection(value);
                    branches.push(FetchBranch::scoped(group, records));
                }
                Err(err) => {
                    // partial failure: drop this branch, keep its siblings
                    warn!("member fetch for group {} failed: {err}", group.id);
                }
            }
        }

        if branches.is_empty() {
            return Err(FetchError::AllBranchesFailed { attempted });
        }
        Ok(branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use roster_domain::{GroupId, aggregate};
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockGateway {
        center_members: Option<Value>,
        groups: Value,
        members: HashMap<String, Result<Value, String>>,
        delays_ms: HashMap<String, u64>,
    }

    impl MockGateway {
        fn new(groups: Value) -> Self {
            Self {
                center_members: None,
                groups,
                members: HashMap::new(),
                delays_ms: HashMap::new(),
            }
        }

        fn with_center_members(mut self, value: Value) -> Self {
            self.center_members = Some(value);
            self
        }

        fn with_members(mut self, group_id: &str, value: Value) -> Self {
            self.members.insert(group_id.to_string(), Ok(value));
            self
        }

        fn with_failure(mut self, group_id: &str) -> Self {
            self.members
                .insert(group_id.to_string(), Err("boom".to_string()));
            self
        }

        fn with_delay(mut self, group_id: &str, ms: u64) -> Self {
            self.delays_ms.insert(group_id.to_string(), ms);
            self
        }
    }

    #[async_trait]
    impl DirectoryGateway for MockGateway {
        async fn list_center_members(&self, _kind: RosterKind) -> Result<Value, GatewayError> {
            match &self.center_members {
                Some(value) => Ok(value.clone()),
                None => Err(GatewayError::RequestFailed(
                    "no privileged payload scripted".to_string(),
                )),
            }
        }

        async fn list_owned_groups(&self) -> Result<Value, GatewayError> {
            Ok(self.groups.clone())
        }

        async fn list_group_members(
            &self,
            group: &GroupId,
            _kind: RosterKind,
        ) -> Result<Value, GatewayError> {
            if let Some(ms) = self.delays_ms.get(group.as_str()) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            match self.members.get(group.as_str()) {
                Some(Ok(value)) => Ok(value.clone()),
                Some(Err(msg)) => Err(GatewayError::RequestFailed(msg.clone())),
                None => Ok(json!([])),
            }
        }
    }

    fn three_groups() -> Value {
        json!([
            {"id": 1, "name": "Math", "center": {"name": "Downtown"}},
            {"id": 2, "name": "Science"},
            {"id": 3, "name": "History"}
        ])
    }

    // ==================== Scoped fan-out ====================

    #[tokio::test]
    async fn test_scoped_branches_follow_listing_order() {
        let gateway = MockGateway::new(three_groups())
            .with_members("1", json!([{"id": 1}]))
            .with_members("2", json!([{"id": 2}]))
            .with_members("3", json!([{"id": 3}]));
        let fetcher = RosterFetcher::new(Arc::new(gateway));

        let branches = fetcher
            .fetch(CapabilityState::ScopedFallback, RosterKind::Students)
            .await
            .unwrap();

        let labels: Vec<&str> = branches.iter().filter_map(|b| b.group_label()).collect();
        assert_eq!(labels, vec!["Math", "Science", "History"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_roster_invariant_under_completion_reordering() {
        // the same branch contents completing in three different orders must
        // publish byte-identical rosters
        let completion_orders: [[u64; 3]; 3] = [[1, 2, 3], [3, 1, 2], [2, 3, 1]];
        let mut rosters = Vec::new();

        for order in completion_orders {
            let gateway = MockGateway::new(three_groups())
                .with_members("1", json!([{"id": 7, "name": "X"}, {"id": 1, "name": "A"}]))
                .with_members("2", json!({"data": [{"id": 7, "name": "X the duplicate"}]}))
                .with_members("3", json!({"items": [{"id": 9, "name": "B"}]}))
                .with_delay("1", order[0] * 10)
                .with_delay("2", order[1] * 10)
                .with_delay("3", order[2] * 10);
            let fetcher = RosterFetcher::new(Arc::new(gateway));

            let branches = fetcher
                .fetch(CapabilityState::ScopedFallback, RosterKind::Students)
                .await
                .unwrap();
            rosters.push(aggregate(&branches));
        }

        assert_eq!(rosters[0], rosters[1]);
        assert_eq!(rosters[1], rosters[2]);
        // first-writer-wins resolved by request order, not completion order
        assert_eq!(rosters[0][0].name, "X");
        assert_eq!(rosters[0][0].memberships, vec!["Math", "Science"]);
    }

    #[tokio::test]
    async fn test_partial_branch_failure_keeps_siblings() {
        let gateway = MockGateway::new(three_groups())
            .with_members("1", json!([{"id": 1}, {"id": 2}]))
            .with_failure("2")
            .with_members("3", json!([{"id": 3}, {"id": 4}, {"id": 1}]));
        let fetcher = RosterFetcher::new(Arc::new(gateway));

        let branches = fetcher
            .fetch(CapabilityState::ScopedFallback, RosterKind::Students)
            .await
            .unwrap();

        assert_eq!(branches.len(), 2);
        let labels: Vec<&str> = branches.iter().filter_map(|b| b.group_label()).collect();
        assert_eq!(labels, vec!["Math", "History"]);

        // union of the surviving branches, deduplicated
        assert_eq!(aggregate(&branches).len(), 4);
    }

    #[tokio::test]
    async fn test_all_branches_failing_is_total() {
        let gateway = MockGateway::new(three_groups())
            .with_failure("1")
            .with_failure("2")
            .with_failure("3");
        let fetcher = RosterFetcher::new(Arc::new(gateway));

        let err = fetcher
            .fetch(CapabilityState::ScopedFallback, RosterKind::Students)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::AllBranchesFailed { attempted: 3 }));
    }

    #[tokio::test]
    async fn test_empty_scope_is_an_empty_success() {
        let gateway = MockGateway::new(json!([]));
        let fetcher = RosterFetcher::new(Arc::new(gateway));

        let branches = fetcher
            .fetch(CapabilityState::ScopedFallback, RosterKind::Students)
            .await
            .unwrap();
        assert!(branches.is_empty());
    }

    #[tokio::test]
    async fn test_scope_listing_failure_is_total() {
        struct FailingGateway;

        #[async_trait]
        impl DirectoryGateway for FailingGateway {
            async fn list_center_members(
                &self,
                _kind: RosterKind,
            ) -> Result<Value, GatewayError> {
                Err(GatewayError::NotFound("center".to_string()))
            }

            async fn list_owned_groups(&self) -> Result<Value, GatewayError> {
                Err(GatewayError::ConnectionError("reset".to_string()))
            }

            async fn list_group_members(
                &self,
                _group: &GroupId,
                _kind: RosterKind,
            ) -> Result<Value, GatewayError> {
                Ok(json!([]))
            }
        }

        let fetcher = RosterFetcher::new(Arc::new(FailingGateway));
        let err = fetcher
            .fetch(CapabilityState::ScopedFallback, RosterKind::Students)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::ScopeListing(_)));
    }

    // ==================== Elevated path ====================

    #[tokio::test]
    async fn test_elevated_selects_kind_collection_and_center() {
        let gateway = MockGateway::new(json!([])).with_center_members(json!({
            "data": {
                "center": {"name": "Downtown"},
                "teachers": {"data": [{"id": 1, "name": "Amina", "groups_count": 3}]},
                "students": [{"id": 99}]
            }
        }));
        let fetcher = RosterFetcher::new(Arc::new(gateway));

        let branches = fetcher
            .fetch(CapabilityState::Elevated, RosterKind::Teachers)
            .await
            .unwrap();

        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].center_label.as_deref(), Some("Downtown"));
        assert_eq!(branches[0].records.len(), 1);
        assert_eq!(branches[0].records[0].groups_count, Some(3));
    }

    #[tokio::test]
    async fn test_elevated_accepts_a_bare_collection() {
        let gateway =
            MockGateway::new(json!([])).with_center_members(json!([{"id": 1}, {"id": 2}]));
        let fetcher = RosterFetcher::new(Arc::new(gateway));

        let branches = fetcher
            .fetch(CapabilityState::Elevated, RosterKind::Students)
            .await
            .unwrap();
        assert_eq!(branches[0].records.len(), 2);
        assert_eq!(branches[0].center_label, None);
    }

    #[tokio::test]
    async fn test_elevated_failure_is_total() {
        let gateway = MockGateway::new(json!([]));
        let fetcher = RosterFetcher::new(Arc::new(gateway));

        let err = fetcher
            .fetch(CapabilityState::Elevated, RosterKind::Students)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Enumeration(_)));
    }

    #[tokio::test]
    async fn test_unresolved_capability_is_rejected() {
        let gateway = MockGateway::new(json!([]));
        let fetcher = RosterFetcher::new(Arc::new(gateway));

        let err = fetcher
            .fetch(CapabilityState::Unknown, RosterKind::Students)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::CapabilityUnresolved));
    }
}
