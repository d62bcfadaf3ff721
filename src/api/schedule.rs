//! Advertising, program schedule and audience voting endpoints

use crate::api::client::ApiClient;
use crate::api::models::{
    AdItem, AdItemCreate, Campaign, CampaignCreate, Program, ProgramCreate, StatusResponse,
    VotingConfig, VotingStats, VotingStatus,
};
use crate::error::Result;

impl ApiClient {
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        self.get_json("/api/ads/campaigns").await
    }

    pub async fn create_campaign(&self, campaign: &CampaignCreate) -> Result<Campaign> {
        self.post_json("/api/ads/campaigns", campaign).await
    }

    pub async fn list_ad_items(&self) -> Result<Vec<AdItem>> {
        self.get_json("/api/ads/items").await
    }

    pub async fn create_ad_item(&self, item: &AdItemCreate) -> Result<AdItem> {
        self.post_json("/api/ads/items", item).await
    }

    pub async fn delete_ad_item(&self, id: i64) -> Result<StatusResponse> {
        self.delete(&format!("/api/ads/items/{}", id)).await
    }

    /// Ads the overlay should be playing right now
    pub async fn active_ads(&self) -> Result<Vec<AdItem>> {
        self.get_json("/api/ads/active").await
    }

    pub async fn list_programs(&self) -> Result<Vec<Program>> {
        self.get_json("/api/programs").await
    }

    pub async fn create_program(&self, program: &ProgramCreate) -> Result<Program> {
        self.post_json("/api/programs", program).await
    }

    pub async fn delete_program(&self, id: i64) -> Result<StatusResponse> {
        self.delete(&format!("/api/programs/{}", id)).await
    }

    pub async fn voting_config(&self) -> Result<VotingConfig> {
        self.get_json("/api/voting/config").await
    }

    pub async fn update_voting_config(&self, config: &VotingConfig) -> Result<StatusResponse> {
        self.post_json("/api/voting/config", config).await
    }

    pub async fn voting_status(&self) -> Result<VotingStatus> {
        self.get_json("/api/voting/status").await
    }

    pub async fn voting_stats(&self) -> Result<VotingStats> {
        self.get_json("/api/voting/stats").await
    }
}
