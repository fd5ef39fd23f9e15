//! # Friend Graph
//!
//! Projections over the friend edges visible to the logged-in user.
//!
//! Edges are directed: `user_id` sent the request, `friend_id` received it.
//! At most one edge exists between any two users, whatever its direction.

use shared::dto::friends::{Friend, FriendStatus};
use shared::dto::user::UserProfile;

use crate::error::{CoreError, Result};

/// Id of the user on the other end of `edge`, seen from `me`.
pub fn other_side(edge: &Friend, me: i64) -> i64 {
    if edge.user_id == me {
        edge.friend_id
    } else {
        edge.user_id
    }
}

/// Embedded profile of the other end of `edge`, when the backend sent it.
pub fn other_profile(edge: &Friend, me: i64) -> Option<&UserProfile> {
    if edge.user_id == me {
        edge.friend.as_ref()
    } else {
        edge.user.as_ref()
    }
}

/// What to do when the user asks to befriend someone
#[derive(Debug, Clone, PartialEq)]
pub enum SendDecision {
    /// No edge yet, send the request
    Send,
    /// An edge already exists in either direction; reuse it
    Existing(Friend),
}

/// Cached view of the user's friend edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FriendGraph {
    me: i64,
    edges: Vec<Friend>,
}

impl FriendGraph {
    pub fn new(me: i64) -> Self {
        Self {
            me,
            edges: Vec::new(),
        }
    }

    pub fn me(&self) -> i64 {
        self.me
    }

    pub fn edges(&self) -> &[Friend] {
        &self.edges
    }

    /// Insert or replace an edge.
    ///
    /// An edge that connects the same pair as an existing one replaces it,
    /// so the graph never holds two edges between the same users.
    pub fn upsert(&mut self, edge: Friend) {
        match self
            .edges
            .iter_mut()
            .find(|e| e.id == edge.id || e.connects(edge.user_id, edge.friend_id))
        {
            Some(slot) => *slot = edge,
            None => self.edges.push(edge),
        }
    }

    /// Replace all edges of one status with a fresh server snapshot.
    pub fn replace_status(&mut self, status: FriendStatus, edges: Vec<Friend>) {
        self.edges.retain(|e| e.status != status);
        for edge in edges {
            self.upsert(edge);
        }
    }

    /// Replace pending requests addressed to me with a fresh server snapshot.
    ///
    /// `GET /friends/requests` lists incoming requests only; requests I sent
    /// stay cached so a repeat send still finds them.
    pub fn replace_incoming(&mut self, edges: Vec<Friend>) {
        let me = self.me;
        self.edges
            .retain(|e| !(e.status == FriendStatus::Pending && e.friend_id == me));
        for edge in edges {
            self.upsert(edge);
        }
    }

    pub fn remove(&mut self, edge_id: i64) -> Option<Friend> {
        let index = self.edges.iter().position(|e| e.id == edge_id)?;
        Some(self.edges.remove(index))
    }

    /// Edge between me and `other`, in either direction
    pub fn edge_with(&self, other: i64) -> Option<&Friend> {
        self.edges.iter().find(|e| e.connects(self.me, other))
    }

    pub fn edge(&self, edge_id: i64) -> Option<&Friend> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    /// Accepted edges
    pub fn friends(&self) -> Vec<&Friend> {
        self.edges
            .iter()
            .filter(|e| e.status == FriendStatus::Accepted)
            .collect()
    }

    /// Pending requests addressed to me
    pub fn incoming(&self) -> Vec<&Friend> {
        self.edges
            .iter()
            .filter(|e| e.status == FriendStatus::Pending && e.friend_id == self.me)
            .collect()
    }

    /// Pending requests I sent
    pub fn outgoing(&self) -> Vec<&Friend> {
        self.edges
            .iter()
            .filter(|e| e.status == FriendStatus::Pending && e.user_id == self.me)
            .collect()
    }

    /// Decide whether a friend request to `target` needs to be sent.
    pub fn plan_send(&self, target: i64) -> Result<SendDecision> {
        if target == self.me {
            return Err(CoreError::InvalidInput(
                "You cannot add yourself as a friend".to_string(),
            ));
        }

        Ok(match self.edge_with(target) {
            Some(edge) => SendDecision::Existing(edge.clone()),
            None => SendDecision::Send,
        })
    }

    /// Check that I may accept or reject `edge_id`: only the recipient of a
    /// pending request may respond.
    pub fn check_respond(&self, edge_id: i64) -> Result<&Friend> {
        let edge = self
            .edge(edge_id)
            .ok_or_else(|| CoreError::NotFound(format!("Friend request {} not found", edge_id)))?;

        if edge.status != FriendStatus::Pending {
            return Err(CoreError::InvalidTransition(
                "Friend request is no longer pending".to_string(),
            ));
        }
        if edge.friend_id != self.me {
            return Err(CoreError::Forbidden(
                "Only the recipient can respond to a friend request".to_string(),
            ));
        }

        Ok(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: i64 = 1;

    fn edge(id: i64, from: i64, to: i64, status: FriendStatus) -> Friend {
        Friend {
            id,
            user_id: from,
            friend_id: to,
            status,
            created_at: "2024-05-01T10:00:00".to_string(),
            user: None,
            friend: None,
        }
    }

    fn graph() -> FriendGraph {
        let mut graph = FriendGraph::new(ME);
        graph.upsert(edge(1, ME, 2, FriendStatus::Accepted));
        graph.upsert(edge(2, 3, ME, FriendStatus::Accepted));
        graph.upsert(edge(3, 4, ME, FriendStatus::Pending));
        graph.upsert(edge(4, ME, 5, FriendStatus::Pending));
        graph
    }

    // ========== Projections ==========

    #[test]
    fn test_other_side() {
        assert_eq!(other_side(&edge(1, ME, 2, FriendStatus::Accepted), ME), 2);
        assert_eq!(other_side(&edge(1, 3, ME, FriendStatus::Accepted), ME), 3);
    }

    #[test]
    fn test_other_profile() {
        let profile = |id: i64| UserProfile {
            id,
            telegram_id: 1000 + id,
            username: format!("user{}", id),
            avatar: None,
            balance: 0.0,
            earned_hours: 0.0,
            spent_hours: 0.0,
            created_at: "2024-05-01T10:00:00".to_string(),
        };
        let mut sent = edge(1, ME, 2, FriendStatus::Accepted);
        sent.user = Some(profile(ME));
        sent.friend = Some(profile(2));
        let received = Friend {
            user_id: 2,
            friend_id: ME,
            user: Some(profile(2)),
            friend: Some(profile(ME)),
            ..sent.clone()
        };

        assert_eq!(other_profile(&sent, ME).map(|p| p.id), Some(2));
        assert_eq!(other_profile(&received, ME).map(|p| p.id), Some(2));
        assert_eq!(other_profile(&edge(3, ME, 4, FriendStatus::Pending), ME), None);
    }

    #[test]
    fn test_projections() {
        let graph = graph();

        let friends: Vec<i64> = graph.friends().iter().map(|e| other_side(e, ME)).collect();
        assert_eq!(friends, vec![2, 3]);
        assert_eq!(graph.incoming().len(), 1);
        assert_eq!(graph.incoming()[0].user_id, 4);
        assert_eq!(graph.outgoing()[0].friend_id, 5);
    }

    // ========== Sending ==========

    #[test]
    fn test_plan_send_reuses_edge_in_either_direction() {
        let graph = graph();

        assert!(matches!(graph.plan_send(5), Ok(SendDecision::Existing(e)) if e.id == 4));
        assert!(matches!(graph.plan_send(4), Ok(SendDecision::Existing(e)) if e.id == 3));
        assert_eq!(graph.plan_send(9), Ok(SendDecision::Send));
        assert!(graph.plan_send(ME).is_err());
    }

    #[test]
    fn test_upsert_never_duplicates_pair() {
        let mut graph = graph();
        let before = graph.edges().len();

        // Server echoes the same pending pair with a new id
        graph.upsert(edge(99, ME, 5, FriendStatus::Pending));

        assert_eq!(graph.edges().len(), before);
        assert_eq!(graph.edge_with(5).map(|e| e.id), Some(99));
    }

    // ========== Responding ==========

    #[test]
    fn test_only_recipient_responds() {
        let graph = graph();

        assert!(graph.check_respond(3).is_ok());
        assert!(matches!(graph.check_respond(4), Err(CoreError::Forbidden(_))));
        assert!(matches!(
            graph.check_respond(1),
            Err(CoreError::InvalidTransition(_))
        ));
        assert!(matches!(graph.check_respond(77), Err(CoreError::NotFound(_))));
    }

    #[test]
    fn test_replace_status_keeps_other_statuses() {
        let mut graph = graph();

        graph.replace_status(FriendStatus::Pending, vec![edge(10, 6, ME, FriendStatus::Pending)]);

        assert_eq!(graph.friends().len(), 2);
        assert_eq!(graph.incoming().len(), 1);
        assert_eq!(graph.incoming()[0].user_id, 6);
        assert!(graph.outgoing().is_empty());
    }

    #[test]
    fn test_replace_incoming_keeps_sent_requests() {
        // Arrange
        let mut graph = graph();

        // Act
        graph.replace_incoming(vec![edge(10, 6, ME, FriendStatus::Pending)]);

        // Assert
        assert_eq!(graph.incoming().len(), 1);
        assert_eq!(graph.incoming()[0].user_id, 6);
        assert_eq!(graph.outgoing().len(), 1);
        assert!(matches!(graph.plan_send(5), Ok(SendDecision::Existing(e)) if e.id == 4));
        assert_eq!(graph.friends().len(), 2);
    }
}
