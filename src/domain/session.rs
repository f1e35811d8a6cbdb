use crate::domain::user::User;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait SessionReader {
        async fn current(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<User>, anyhow::Error>;
    }

    pub trait SessionWriter {
        async fn save(
            &self,
            user: &User,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        async fn clear(&self, ext_cxn: &mut impl ExternalConnectivity)
        -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait SessionPort {
        async fn log_in(
            &self,
            username: &str,
            password: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            session_write: &impl driven_ports::SessionWriter,
        ) -> Result<User, anyhow::Error>;
        async fn log_out(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            session_write: &impl driven_ports::SessionWriter,
        ) -> Result<(), anyhow::Error>;
        async fn current_user(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            session_read: &impl driven_ports::SessionReader,
        ) -> Result<Option<User>, anyhow::Error>;
        async fn set_current_user(
            &self,
            user: &User,
            ext_cxn: &mut impl ExternalConnectivity,
            session_write: &impl driven_ports::SessionWriter,
        ) -> Result<(), anyhow::Error>;
    }
}

pub struct SessionService {}

impl driving_ports::SessionPort for SessionService {
    // Credentials are never verified against anything. The API boundary requires both
    // fields to be non-empty, and the profile is synthesized from the username alone.
    async fn log_in(
        &self,
        username: &str,
        _password: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        session_write: &impl driven_ports::SessionWriter,
    ) -> Result<User, anyhow::Error> {
        let user = User::for_username(username);
        session_write
            .save(&user, &mut *ext_cxn)
            .await
            .context("persisting the session at login")?;

        Ok(user)
    }

    async fn log_out(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        session_write: &impl driven_ports::SessionWriter,
    ) -> Result<(), anyhow::Error> {
        session_write
            .clear(&mut *ext_cxn)
            .await
            .context("clearing the persisted session")?;

        Ok(())
    }

    async fn current_user(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        session_read: &impl driven_ports::SessionReader,
    ) -> Result<Option<User>, anyhow::Error> {
        session_read
            .current(&mut *ext_cxn)
            .await
            .context("reading the persisted session")
    }

    async fn set_current_user(
        &self,
        user: &User,
        ext_cxn: &mut impl ExternalConnectivity,
        session_write: &impl driven_ports::SessionWriter,
    ) -> Result<(), anyhow::Error> {
        session_write
            .save(user, &mut *ext_cxn)
            .await
            .context("persisting the session")
    }
}
