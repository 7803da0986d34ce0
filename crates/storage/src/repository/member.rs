use uuid::Uuid;

use crate::db::ClubDb;
use crate::dto::common::PaginationParams;
use crate::dto::member::{CreateMemberRequest, UpdateMemberRequest};
use crate::error::{Result, StorageError};
use crate::models::Member;

pub struct MemberRepository<'a> {
    db: &'a ClubDb,
}

impl<'a> MemberRepository<'a> {
    pub fn new(db: &'a ClubDb) -> Self {
        Self { db }
    }

    pub fn create(&self, request: &CreateMemberRequest) -> Result<Member> {
        request
            .validate_role()
            .map_err(StorageError::constraint)?;

        let mut state = self.db.write();

        if let Some(av_number) = &request.av_number
            && state
                .members
                .values()
                .any(|m| m.av_number.as_deref() == Some(av_number))
        {
            return Err(StorageError::constraint(format!(
                "AV number {av_number} is already issued"
            )));
        }

        let member = Member {
            member_id: Uuid::new_v4(),
            av_number: request.av_number.clone(),
            full_name: request.full_name.clone(),
            birth_year: request.birth_year,
            gender: request.gender,
            division: request.division,
            is_recorder: request.is_recorder,
            created_at: chrono::Utc::now().naive_utc(),
        };
        state.members.insert(member.member_id, member.clone());

        Ok(member)
    }

    pub fn get(&self, member_id: Uuid) -> Result<Member> {
        self.db
            .read()
            .members
            .get(&member_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    /// Members sorted by name. There is deliberately no delete: historical
    /// scores keep referencing every member ever registered.
    pub fn list(&self, pagination: &PaginationParams) -> (Vec<Member>, usize) {
        let state = self.db.read();
        let mut members: Vec<Member> = state.members.values().cloned().collect();
        members.sort_by(|a, b| a.full_name.cmp(&b.full_name));

        let total = members.len();
        let page: Vec<Member> = members
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.limit())
            .collect();

        (page, total)
    }

    pub fn update(&self, member_id: Uuid, request: &UpdateMemberRequest) -> Result<Member> {
        let mut state = self.db.write();

        if let Some(av_number) = &request.av_number
            && state
                .members
                .values()
                .any(|m| m.member_id != member_id && m.av_number.as_deref() == Some(av_number))
        {
            return Err(StorageError::constraint(format!(
                "AV number {av_number} is already issued"
            )));
        }

        let member = state
            .members
            .get_mut(&member_id)
            .ok_or(StorageError::NotFound)?;

        if member.is_recorder && (request.av_number.is_some() || request.division.is_some()) {
            return Err(StorageError::constraint(
                "A recorder must not have a division or an AV number",
            ));
        }

        if let Some(full_name) = &request.full_name {
            member.full_name = full_name.clone();
        }
        if let Some(av_number) = &request.av_number {
            member.av_number = Some(av_number.clone());
        }
        if let Some(birth_year) = request.birth_year {
            member.birth_year = birth_year;
        }
        if let Some(gender) = request.gender {
            member.gender = gender;
        }
        if let Some(division) = request.division {
            member.division = Some(division);
        }

        Ok(member.clone())
    }
}
