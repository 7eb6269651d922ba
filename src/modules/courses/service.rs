use coursebook_core::AppError;
use coursebook_db::CourseRepository;
use coursebook_models::{Course, CourseDto, CourseWithOwner, User};
use tracing::{info, instrument};

const NOT_OWNER: &str = "You can only modify courses you own";
const FOREIGN_OWNER: &str = "You can only create courses for yourself";

pub struct CourseService;

impl CourseService {
    /// Path ids that are not integers cannot name a course.
    pub fn parse_id(raw: &str) -> Result<i64, AppError> {
        raw.parse::<i64>()
            .map_err(|_| AppError::not_found("Course"))
    }

    #[instrument(skip(courses))]
    pub async fn list_courses(
        courses: &dyn CourseRepository,
    ) -> Result<Vec<CourseWithOwner>, AppError> {
        Ok(courses.find_all().await?)
    }

    #[instrument(skip(courses))]
    pub async fn get_course(
        courses: &dyn CourseRepository,
        id: i64,
    ) -> Result<CourseWithOwner, AppError> {
        courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Course"))
    }

    #[instrument(skip(courses, principal, dto), fields(user_id = principal.id))]
    pub async fn create_course(
        courses: &dyn CourseRepository,
        principal: &User,
        dto: CourseDto,
    ) -> Result<Course, AppError> {
        if dto.user_id.is_some_and(|id| id != principal.id) {
            return Err(AppError::forbidden(FOREIGN_OWNER));
        }

        let course = courses.create(principal.id, &dto).await?;
        info!(course_id = course.id, "Course created");

        Ok(course)
    }

    #[instrument(skip(courses, principal, dto), fields(user_id = principal.id))]
    pub async fn update_course(
        courses: &dyn CourseRepository,
        principal: &User,
        id: i64,
        dto: CourseDto,
    ) -> Result<(), AppError> {
        let existing = Self::get_course(courses, id).await?;
        if existing.course.user_id != principal.id {
            return Err(AppError::forbidden(NOT_OWNER));
        }
        if dto.user_id.is_some_and(|owner| owner != principal.id) {
            return Err(AppError::forbidden(NOT_OWNER));
        }

        // Deleted between the read and the write.
        if !courses.update(id, &dto).await? {
            return Err(AppError::not_found("Course"));
        }

        Ok(())
    }

    #[instrument(skip(courses, principal), fields(user_id = principal.id))]
    pub async fn delete_course(
        courses: &dyn CourseRepository,
        principal: &User,
        id: i64,
    ) -> Result<(), AppError> {
        let existing = Self::get_course(courses, id).await?;
        if existing.course.user_id != principal.id {
            return Err(AppError::forbidden(NOT_OWNER));
        }

        if !courses.destroy(id).await? {
            return Err(AppError::not_found("Course"));
        }
        info!(course_id = id, "Course deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_db::{UserRepository, memory::InMemoryStore};
    use coursebook_models::NewUser;

    async fn user(store: &InMemoryStore, email: &str) -> User {
        UserRepository::create(
            store,
            NewUser {
                first_name: "Joe".to_string(),
                last_name: "Smith".to_string(),
                email_address: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
            },
        )
        .await
        .unwrap()
    }

    fn dto(title: &str, user_id: Option<i64>) -> CourseDto {
        CourseDto {
            title: title.to_string(),
            description: "Learn by building".to_string(),
            estimated_time: None,
            materials_needed: None,
            user_id,
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(CourseService::parse_id("12").unwrap(), 12);
        assert!(matches!(
            CourseService::parse_id("abc"),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_belongs_to_principal() {
        let store = InMemoryStore::new();
        let joe = user(&store, "joe@smith.com").await;

        let course = CourseService::create_course(&store, &joe, dto("Bookcase", None))
            .await
            .unwrap();
        assert_eq!(course.user_id, joe.id);
    }

    #[tokio::test]
    async fn test_create_for_someone_else_is_forbidden() {
        let store = InMemoryStore::new();
        let joe = user(&store, "joe@smith.com").await;

        let err = CourseService::create_course(&store, &joe, dto("Bookcase", Some(joe.id + 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(store.course_count().await, 0);
    }

    #[tokio::test]
    async fn test_only_owner_may_update_or_delete() {
        let store = InMemoryStore::new();
        let joe = user(&store, "joe@smith.com").await;
        let sally = user(&store, "sally@jones.com").await;
        let course = CourseService::create_course(&store, &joe, dto("Bookcase", None))
            .await
            .unwrap();

        let err = CourseService::update_course(&store, &sally, course.id, dto("Shelf", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = CourseService::delete_course(&store, &sally, course.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        CourseService::update_course(&store, &joe, course.id, dto("Shelf", None))
            .await
            .unwrap();
        let updated = CourseService::get_course(&store, course.id).await.unwrap();
        assert_eq!(updated.course.title, "Shelf");

        CourseService::delete_course(&store, &joe, course.id)
            .await
            .unwrap();
        assert_eq!(store.course_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_course_is_not_found() {
        let store = InMemoryStore::new();
        let joe = user(&store, "joe@smith.com").await;

        let err = CourseService::delete_course(&store, &joe, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref entity) if entity == "Course"));
    }
}
