use lexportal_db_schema_file::schema::secret;

#[derive(Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = secret)]
#[diesel(check_for_backend(diesel::pg::Pg))]
/// Server-side secrets, generated by the initial migration.
pub struct Secret {
  pub id: i32,
  pub jwt_secret: String,
}
