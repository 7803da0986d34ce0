use storage::{
    ClubDb,
    dto::common::PaginationParams,
    dto::member::{CreateMemberRequest, UpdateMemberRequest},
    error::Result,
    models::Member,
    repository::member::MemberRepository,
};
use uuid::Uuid;

/// List members, sorted by name
pub async fn list_members(db: &ClubDb, pagination: &PaginationParams) -> (Vec<Member>, usize) {
    MemberRepository::new(db).list(pagination)
}

/// Get member by id
pub async fn get_member(db: &ClubDb, member_id: Uuid) -> Result<Member> {
    MemberRepository::new(db).get(member_id)
}

/// Register a new member
pub async fn create_member(db: &ClubDb, request: &CreateMemberRequest) -> Result<Member> {
    MemberRepository::new(db).create(request)
}

/// Update member demographics
pub async fn update_member(
    db: &ClubDb,
    member_id: Uuid,
    request: &UpdateMemberRequest,
) -> Result<Member> {
    MemberRepository::new(db).update(member_id, request)
}
